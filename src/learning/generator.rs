use crate::dataset::Case;
use crate::learning::sampler::Sampler;
use crate::rule::Rule;

/// Lazy chain of increasingly specific candidate rules from one case pair
///
/// All rules in a chain share one consequent attribute and seed value; each
/// emitted rule adds one antecedent constraint to the previous one.
#[derive(Debug, Clone)]
pub struct CandidateChain<'a> {
    seed: &'a Case,
    /// Shuffled agreement attributes still available, consumed from the end
    pending: Vec<usize>,
    current: Option<Rule>,
    remaining: usize,
}

impl Iterator for CandidateChain<'_> {
    type Item = Rule;

    fn next(&mut self) -> Option<Rule> {
        if self.remaining == 0 {
            return None;
        }
        let attribute = self.pending.pop()?;
        let value = self.seed.get(attribute)?;
        let next = self.current.as_ref()?.extend(attribute, value);
        self.remaining -= 1;
        self.current = Some(next.clone());
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Attribute indices, ascending, where `a` and `b` hold equal values
pub fn agreement_set(a: &Case, b: &Case) -> Vec<usize> {
    a.values()
        .iter()
        .enumerate()
        .filter(|(attribute, value)| b.get(*attribute) == Some(value.as_str()))
        .map(|(attribute, _)| attribute)
        .collect()
}

/// Start a candidate chain for the pair (`a`, `b`)
///
/// Draws from `sampler` immediately (the agreement permutation), so the
/// sampler's stream position does not depend on how far the chain is consumed.
/// At most `max_rules` rules are emitted, and never more than the agreement set
/// minus the consequent attribute.
pub fn generate_candidates<'a>(
    a: &'a Case,
    b: &Case,
    max_rules: usize,
    sampler: &mut Sampler,
) -> CandidateChain<'a> {
    let agreement = agreement_set(a, b);
    if agreement.is_empty() {
        return CandidateChain {
            seed: a,
            pending: Vec::new(),
            current: None,
            remaining: 0,
        };
    }

    let mut pending = sampler.permute(&agreement);
    let base = pending
        .pop()
        .and_then(|attribute| a.get(attribute).map(|value| Rule::new(attribute, value)));
    let remaining = pending.len().min(max_rules);

    CandidateChain {
        seed: a,
        pending,
        current: base,
        remaining,
    }
}
