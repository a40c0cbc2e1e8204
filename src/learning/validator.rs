use crate::dataset::Case;
use crate::rule::Rule;

/// Outcome of checking rules against held-out validation cases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Rules never violated by a validation case, in their original order
    pub retained: Vec<Rule>,
    /// Number of rules dropped
    pub rejected: usize,
}

/// Whether any validation case bound by `rule` carries an unseen consequent value
pub fn is_contradicted(rule: &Rule, validation: &[Case]) -> bool {
    validation
        .iter()
        .any(|case| rule.binds(case) && rule.is_violated_by(case))
}

/// Keep only rules with no contradicting validation case
///
/// All-or-nothing per rule: a single contradiction drops it, and a rule that
/// binds to no validation case at all is kept.
pub fn validate_rules(rules: Vec<Rule>, validation: &[Case]) -> ValidationOutcome {
    let before = rules.len();
    let retained: Vec<Rule> = rules
        .into_iter()
        .filter(|rule| !is_contradicted(rule, validation))
        .collect();

    ValidationOutcome {
        rejected: before - retained.len(),
        retained,
    }
}
