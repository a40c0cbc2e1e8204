// Rule-violation anomaly scoring
//
// Scores an ordered case sequence against a learned rule set. A case violating
// a rule scores that rule's n/r weighted by the time since the rule was last
// violated, so long-quiet rules that suddenly fire count the most. Decisions
// at a threshold are compared against a labeled "normal" attribute to produce
// detection and false alarm rates.

mod confusion;
mod predictor;
mod sweep;

pub use confusion::{
    label_scores, summarize, ConfusionMatrix, GroundTruth, Percentage, PredictionSummary,
    ScoredCase,
};
pub use predictor::{CaseScore, Predictor};
pub use sweep::{roc_auc, roc_point, sweep};

use crate::dataset::Case;
use crate::rule::RuleSet;

/// Score `cases` in order against `rules` and attach ground-truth labels
pub fn score_cases(rules: &RuleSet, cases: &[Case], truth: &GroundTruth) -> Vec<ScoredCase> {
    let mut predictor = Predictor::new(rules);
    let scores = predictor.score_all(cases);
    tracing::debug!(
        "Scored {} cases against {} rules",
        predictor.position(),
        rules.len()
    );
    label_scores(&scores, cases, truth)
}

/// Score `cases` and summarize the decisions at `threshold`
pub fn predict(
    rules: &RuleSet,
    cases: &[Case],
    truth: &GroundTruth,
    threshold: f64,
) -> PredictionSummary {
    let summary = summarize(&score_cases(rules, cases, truth), threshold);
    tracing::info!(
        "Flagged {} of {} cases ({} unclassified)",
        summary.flagged,
        summary.total,
        summary.unclassified
    );
    summary
}
