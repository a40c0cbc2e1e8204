use crate::prediction::confusion::{summarize, PredictionSummary, ScoredCase};

/// Summaries of one scoring pass at each threshold
///
/// Case scores do not depend on the threshold, so the cases are scored once
/// and only the decisions are recomputed per threshold.
pub fn sweep(scored: &[ScoredCase], thresholds: &[f64]) -> Vec<PredictionSummary> {
    thresholds
        .iter()
        .map(|&threshold| summarize(scored, threshold))
        .collect()
}

/// ROC point `(false alarm rate, detection rate)` as fractions, if both are defined
pub fn roc_point(summary: &PredictionSummary) -> Option<(f64, f64)> {
    let far = summary.matrix.false_alarm_rate().value()?;
    let dr = summary.matrix.detection_rate().value()?;
    Some((far / 100.0, dr / 100.0))
}

/// Area under the ROC curve traced by `summaries`
///
/// Uses the trapezoid rule over the defined points plus the `(0, 0)` and
/// `(1, 1)` anchors. Returns `None` when no summary yields a defined point.
pub fn roc_auc(summaries: &[PredictionSummary]) -> Option<f64> {
    let mut points: Vec<(f64, f64)> = summaries.iter().filter_map(roc_point).collect();
    if points.is_empty() {
        return None;
    }

    points.push((0.0, 0.0));
    points.push((1.0, 1.0));
    points.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let area: f64 = points
        .windows(2)
        .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
        .sum();
    Some(area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::predictor::CaseScore;

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
    fn test_sweep_one_summary_per_threshold() {
        let cases = vec![scored(0.0, true), scored(10.0, false)];
        let summaries = sweep(&cases, &[0.0, 5.0, 20.0]);
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].matrix.false_positives, 1);
        assert_eq!(summaries[1].matrix.true_positives, 1);
        assert_eq!(summaries[1].matrix.false_positives, 0);
        assert_eq!(summaries[2].matrix.false_negatives, 1);
    }

    #[test]
    fn test_perfect_separation_auc() {
        let cases = vec![
            scored(0.0, true),
            scored(1.0, true),
            scored(10.0, false),
            scored(12.0, false),
        ];
        let auc = roc_auc(&sweep(&cases, &[0.0, 5.0, 50.0])).unwrap();
        assert!((auc - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverted_scores_auc() {
        let cases = vec![scored(10.0, true), scored(0.0, false)];
        let auc = roc_auc(&sweep(&cases, &[5.0])).unwrap();
        assert!(auc.abs() < 1e-12);
    }

    #[test]
    fn test_uninformative_scores_auc() {
        let cases = vec![scored(3.0, true), scored(3.0, false)];
        let auc = roc_auc(&sweep(&cases, &[1.0, 5.0])).unwrap();
        assert!((auc - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_auc_undefined_without_both_classes() {
        let cases = vec![scored(3.0, true), scored(0.0, true)];
        assert_eq!(roc_auc(&sweep(&cases, &[1.0, 5.0])), None);
        assert_eq!(roc_auc(&[]), None);
    }
}
