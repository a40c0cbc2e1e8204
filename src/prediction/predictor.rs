use crate::dataset::Case;
use crate::rule::RuleSet;

/// Anomaly score of one case
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaseScore {
    /// 1-based position of the case in the scored sequence
    pub position: usize,
    /// Sum over violated rules of `(position - last violation) * n/r`
    pub score: f64,
    /// At least one binding rule was violated
    pub flagged: bool,
    /// At least one rule bound to the case
    pub classified: bool,
}

impl CaseScore {
    /// Decision at `threshold`: anomalous iff the score reaches it
    pub fn is_anomalous(&self, threshold: f64) -> bool {
        self.score >= threshold
    }
}

/// Streaming scorer over an ordered case sequence
///
/// Cases are treated as a time series: a violated rule contributes its n/r
/// score weighted by how many positions have passed since that rule was last
/// violated (or since the start of the run). The per-rule "last violated"
/// positions live only as long as this predictor.
#[derive(Debug)]
pub struct Predictor<'r> {
    rules: &'r RuleSet,
    last_fired: Vec<usize>,
    position: usize,
}

impl<'r> Predictor<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self {
            rules,
            last_fired: vec![0; rules.len()],
            position: 0,
        }
    }

    /// Score the next case in the sequence
    pub fn score_next(&mut self, case: &Case) -> CaseScore {
        self.position += 1;
        let position = self.position;

        let mut score = 0.0;
        let mut flagged = false;
        let mut classified = false;

        for (rule, last) in self.rules.iter().zip(self.last_fired.iter_mut()) {
            if !rule.binds(case) {
                continue;
            }
            classified = true;
            if rule.is_violated_by(case) {
                flagged = true;
                score += (position - *last) as f64 * rule.score();
                *last = position;
            }
        }

        CaseScore {
            position,
            score,
            flagged,
            classified,
        }
    }

    /// Score every case in order
    pub fn score_all(&mut self, cases: &[Case]) -> Vec<CaseScore> {
        cases.iter().map(|case| self.score_next(case)).collect()
    }

    /// Number of cases scored so far
    pub fn position(&self) -> usize {
        self.position
    }
}
