// Rule learning for anomaly detection (LERAD)
//
// Learns conjunctive rules describing normal categorical records:
// 1. hold out the leading cases for validation
// 2. sample a subset of the training cases and draw case pairs from it
// 3. generate candidate rule chains from the attributes each pair agrees on
// 4. count bindings of each candidate on the subset
// 5. coverage test: drop rules subsumed by better, more general rules
// 6. count bindings of survivors on the rest of the training cases
// 7. drop rules contradicted by the validation cases
//
// Scientific Foundation:
// Mahoney, M. V., & Chan, P. K. (2003). Learning rules for anomaly detection of
// hostile network traffic. Third IEEE International Conference on Data Mining.

mod generator;
mod reducer;
mod sampler;
mod validator;

pub use generator::{agreement_set, generate_candidates, CandidateChain};
pub use reducer::reduce_coverage;
pub use sampler::{Sampler, DEFAULT_SEED};
pub use validator::{is_contradicted, validate_rules, ValidationOutcome};

use crate::config::LearnConfig;
use crate::dataset::Case;
use crate::error::{LeradError, Result};
use crate::rule::{Rule, RuleSet};
use std::collections::HashSet;

/// Counts describing one learning run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LearnStats {
    pub training_cases: usize,
    pub validation_cases: usize,
    pub sample_size: usize,
    pub candidates: usize,
    pub after_reduction: usize,
    pub rejected_by_validation: usize,
}

/// Learned rule set with the statistics of the run that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct LearnOutcome {
    pub rules: RuleSet,
    pub stats: LearnStats,
}

/// Count bindings of every rule over `cases`, widening consequent sets
pub fn accumulate_bindings<'a, I>(rules: &mut [Rule], cases: I)
where
    I: IntoIterator<Item = &'a Case> + Clone,
{
    for rule in rules.iter_mut() {
        for case in cases.clone() {
            rule.observe(case);
        }
    }
}

/// Learn a rule set from `cases`
///
/// Every random draw comes from `sampler`, so a fixed seed reproduces the
/// same rule set for the same cases and configuration.
pub fn learn(cases: &[Case], config: &LearnConfig, sampler: &mut Sampler) -> Result<LearnOutcome> {
    config.validate()?;

    let validation_count = config.validation_count(cases.len());
    if validation_count >= cases.len() {
        return Err(LeradError::config(format!(
            "validation fraction {} leaves no training cases out of {}",
            config.validation_fraction,
            cases.len()
        )));
    }

    let (validation, training) = cases.split_at(validation_count);
    tracing::info!(
        "Learning from {} training cases ({} held out for validation)",
        training.len(),
        validation.len()
    );

    let subset_indices = sampler.sample_indices(training.len(), config.sample_size)?;
    let subset: Vec<&Case> = subset_indices.iter().map(|&i| &training[i]).collect();
    let pairs = sampler.sample_pairs(&subset, config.sample_pairs)?;

    let mut candidates = Vec::new();
    for (a, b) in pairs {
        for mut rule in generate_candidates(a, b, config.max_rules_per_pair, sampler) {
            for case in &subset {
                rule.observe(*case);
            }
            candidates.push(rule);
        }
    }
    let candidate_count = candidates.len();
    tracing::debug!("Generated {} candidate rules", candidate_count);

    let mut rules = reduce_coverage(candidates);
    let after_reduction = rules.len();
    tracing::debug!(
        "Coverage test kept {} of {} rules",
        after_reduction,
        candidate_count
    );

    let sampled: HashSet<usize> = subset_indices.into_iter().collect();
    let remaining = training
        .iter()
        .enumerate()
        .filter(|(i, _)| !sampled.contains(i))
        .map(|(_, case)| case);
    accumulate_bindings(&mut rules, remaining);

    let outcome = validate_rules(rules, validation);
    tracing::info!(
        "Learned {} rules ({} rejected by validation)",
        outcome.retained.len(),
        outcome.rejected
    );

    Ok(LearnOutcome {
        stats: LearnStats {
            training_cases: training.len(),
            validation_cases: validation.len(),
            sample_size: config.sample_size,
            candidates: candidate_count,
            after_reduction,
            rejected_by_validation: outcome.rejected,
        },
        rules: RuleSet::new(outcome.retained),
    })
}
