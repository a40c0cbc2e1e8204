use crate::config::NormalLabel;
use crate::dataset::{AttributeSchema, Case};
use crate::error::{LeradError, Result};
use crate::prediction::predictor::CaseScore;
use std::fmt;

/// Percentage that is undefined when its denominator is zero
///
/// Displays as the plain number, or as `NaN` when undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentage(Option<f64>);

impl Percentage {
    /// `numerator / denominator * 100`, undefined for a zero denominator
    pub fn ratio(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            Self(None)
        } else {
            Self(Some(numerator as f64 / denominator as f64 * 100.0))
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn is_defined(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "NaN"),
        }
    }
}

/// Attribute index and value identifying normal cases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTruth {
    attribute: usize,
    normal_value: String,
}

impl GroundTruth {
    pub fn new(attribute: usize, normal_value: impl Into<String>) -> Self {
        Self {
            attribute,
            normal_value: normal_value.into(),
        }
    }

    /// Look up the label attribute by name
    pub fn resolve(label: &NormalLabel, schema: &AttributeSchema) -> Result<Self> {
        let attribute = schema.index_of(&label.attribute).ok_or_else(|| {
            LeradError::config(format!(
                "normal attribute '{}' is not in the schema",
                label.attribute
            ))
        })?;
        Ok(Self::new(attribute, label.value.clone()))
    }

    pub fn is_normal(&self, case: &Case) -> bool {
        case.get(self.attribute) == Some(self.normal_value.as_str())
    }
}

/// Decision counts against ground truth; "positive" means anomalous
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_positives: u64,
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
}

impl ConfusionMatrix {
    pub fn record(&mut self, anomalous: bool, normal: bool) {
        match (anomalous, normal) {
            (true, false) => self.true_positives += 1,
            (true, true) => self.false_positives += 1,
            (false, true) => self.true_negatives += 1,
            (false, false) => self.false_negatives += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    pub fn accuracy(&self) -> Percentage {
        Percentage::ratio(self.true_positives + self.true_negatives, self.total())
    }

    /// Share of anomalous cases flagged
    pub fn detection_rate(&self) -> Percentage {
        Percentage::ratio(
            self.true_positives,
            self.true_positives + self.false_negatives,
        )
    }

    /// Share of normal cases flagged
    pub fn false_alarm_rate(&self) -> Percentage {
        Percentage::ratio(
            self.false_positives,
            self.false_positives + self.true_negatives,
        )
    }
}

/// Case score paired with its ground-truth label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCase {
    pub score: CaseScore,
    pub is_normal: bool,
}

/// Attach ground-truth labels to scores (cases and scores in the same order)
pub fn label_scores(scores: &[CaseScore], cases: &[Case], truth: &GroundTruth) -> Vec<ScoredCase> {
    scores
        .iter()
        .zip(cases)
        .map(|(score, case)| ScoredCase {
            score: *score,
            is_normal: truth.is_normal(case),
        })
        .collect()
}

/// Outcome of one prediction pass at one threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionSummary {
    pub threshold: f64,
    pub flagged: u64,
    pub unclassified: u64,
    pub total: u64,
    pub matrix: ConfusionMatrix,
}

/// Summarize labeled scores at `threshold`
pub fn summarize(scored: &[ScoredCase], threshold: f64) -> PredictionSummary {
    let mut summary = PredictionSummary {
        threshold,
        flagged: 0,
        unclassified: 0,
        total: scored.len() as u64,
        matrix: ConfusionMatrix::default(),
    };

    for case in scored {
        if case.score.flagged {
            summary.flagged += 1;
        }
        if !case.score.classified {
            summary.unclassified += 1;
        }
        summary
            .matrix
            .record(case.score.is_anomalous(threshold), case.is_normal);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(score: f64, is_normal: bool) -> ScoredCase {
        ScoredCase {
            score: CaseScore {
                position: 1,
                score,
                flagged: score > 0.0,
                classified: true,
            },
            is_normal,
        }
    }

    #[test]
    fn test_percentage_display() {
        assert_eq!(Percentage::ratio(1, 4).to_string(), "25");
        let third = Percentage::ratio(1, 3).value().unwrap();
        assert!((third - 33.333).abs() < 0.001);
        assert_eq!(Percentage::ratio(0, 0).to_string(), "NaN");
        assert!(!Percentage::ratio(3, 0).is_defined());
    }

    #[test]
    fn test_record_quadrants() {
        let mut matrix = ConfusionMatrix::default();
        matrix.record(true, false);
        matrix.record(true, true);
        matrix.record(false, true);
        matrix.record(false, true);
        matrix.record(false, false);
        assert_eq!(
            matrix,
            ConfusionMatrix {
                true_positives: 1,
                true_negatives: 2,
                false_positives: 1,
                false_negatives: 1,
            }
        );
        assert_eq!(matrix.total(), 5);
        assert_eq!(matrix.accuracy().value(), Some(60.0));
        assert_eq!(matrix.detection_rate().value(), Some(50.0));
        assert!(matrix.false_alarm_rate().to_string().starts_with("33.33"));
    }

    #[test]
    fn test_rates_undefined_without_class() {
        let mut matrix = ConfusionMatrix::default();
        matrix.record(false, true);
        assert_eq!(matrix.detection_rate().to_string(), "NaN");
        assert_eq!(matrix.false_alarm_rate().value(), Some(0.0));
        assert_eq!(ConfusionMatrix::default().accuracy().to_string(), "NaN");
    }

    #[test]
    fn test_ground_truth_resolve() {
        let schema = AttributeSchema::new(["protocol", "class"]);
        let label = NormalLabel {
            attribute: "class".into(),
            value: "normal".into(),
        };
        let truth = GroundTruth::resolve(&label, &schema).unwrap();
        assert!(truth.is_normal(&Case::new(["tcp", "normal"])));
        assert!(!truth.is_normal(&Case::new(["tcp", "smurf"])));

        let missing = NormalLabel {
            attribute: "label".into(),
            value: "normal".into(),
        };
        assert!(GroundTruth::resolve(&missing, &schema)
            .unwrap_err()
            .is_configuration());
    }

    #[test]
    fn test_ground_truth_uses_last_duplicate_attribute() {
        let schema = AttributeSchema::new(["class", "protocol", "class"]);
        let label = NormalLabel {
            attribute: "class".into(),
            value: "normal".into(),
        };
        let truth = GroundTruth::resolve(&label, &schema).unwrap();
        assert!(truth.is_normal(&Case::new(["smurf", "tcp", "normal"])));
        assert!(!truth.is_normal(&Case::new(["normal", "tcp", "smurf"])));
    }

    #[test]
    fn test_summarize() {
        let cases = vec![
            scored(0.0, true),
            scored(12.0, false),
            scored(3.0, true),
            scored(0.0, false),
        ];
        let summary = summarize(&cases, 5.0);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.flagged, 2);
        assert_eq!(summary.unclassified, 0);
        assert_eq!(summary.matrix.true_positives, 1);
        assert_eq!(summary.matrix.true_negatives, 2);
        assert_eq!(summary.matrix.false_positives, 0);
        assert_eq!(summary.matrix.false_negatives, 1);
    }
}
