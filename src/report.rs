//! Text reports for learn, predict and sweep runs
//!
//! Reports are written to the `-o` file. Only [`stdout_line`] goes to stdout,
//! so callers can parse `accuracy\tdetection rate\tfalse alarm rate` directly.

use crate::dataset::AttributeSchema;
use crate::prediction::{roc_auc, PredictionSummary};
use crate::rule::RuleSet;
use std::fmt::Write as _;

/// One `IF ... THEN ...` line per rule, in rule set order
pub fn rule_listing(rules: &RuleSet, schema: &AttributeSchema) -> String {
    let mut out = String::new();
    for rule in rules {
        let _ = writeln!(out, "{}", rule.display(schema));
    }
    out
}

/// Counts and rates of one prediction run
pub fn prediction_report(summary: &PredictionSummary) -> String {
    let matrix = &summary.matrix;
    let mut out = String::new();
    let _ = writeln!(out, "{:<20}{}", "Flagged:", summary.flagged);
    let _ = writeln!(out, "{:<20}{}", "Unclassified:", summary.unclassified);
    out.push('\n');
    let _ = writeln!(out, "{:<20}{}", "True Positives:", matrix.true_positives);
    let _ = writeln!(out, "{:<20}{}", "True Negatives:", matrix.true_negatives);
    let _ = writeln!(out, "{:<20}{}", "False Positives:", matrix.false_positives);
    let _ = writeln!(out, "{:<20}{}", "False Negatives:", matrix.false_negatives);
    let _ = writeln!(out, "{:<20}{}", "Total:", summary.total);
    out.push('\n');
    let _ = writeln!(out, "{:<20}{}%", "Accuracy:", matrix.accuracy());
    let _ = writeln!(out, "{:<20}{}%", "Detection Rate:", matrix.detection_rate());
    let _ = writeln!(out, "{:<20}{}%", "False Alarm Rate:", matrix.false_alarm_rate());
    out
}

/// `accuracy\tdetection rate\tfalse alarm rate`, without a trailing newline
pub fn stdout_line(summary: &PredictionSummary) -> String {
    let matrix = &summary.matrix;
    format!(
        "{}\t{}\t{}",
        matrix.accuracy(),
        matrix.detection_rate(),
        matrix.false_alarm_rate()
    )
}

/// One `threshold\tacc\tdr\tfar` line per threshold, then `AUC\t<area>`
pub fn sweep_table(summaries: &[PredictionSummary]) -> String {
    let mut out = String::new();
    for summary in summaries {
        let _ = writeln!(out, "{}\t{}", summary.threshold, stdout_line(summary));
    }
    match roc_auc(summaries) {
        Some(area) => {
            let _ = writeln!(out, "AUC\t{}", area);
        }
        None => out.push_str("AUC\tNaN\n"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Case;
    use crate::prediction::ConfusionMatrix;
    use crate::rule::Rule;

    fn summary(threshold: f64, tp: u64, tn: u64, fp: u64, fn_: u64) -> PredictionSummary {
        PredictionSummary {
            threshold,
            flagged: tp + fp,
            unclassified: 1,
            total: tp + tn + fp + fn_,
            matrix: ConfusionMatrix {
                true_positives: tp,
                true_negatives: tn,
                false_positives: fp,
                false_negatives: fn_,
            },
        }
    }

    #[test]
    fn test_rule_listing() {
        let schema = AttributeSchema::new(["protocol", "service", "class"]);
        let mut first = Rule::new(1, "http").extend(0, "tcp");
        first.observe(&Case::new(["tcp", "http", "normal"]));
        first.observe(&Case::new(["tcp", "smtp", "normal"]));
        let second = Rule::new(2, "normal");
        let listing = rule_listing(&RuleSet::new(vec![first, second]), &schema);
        assert_eq!(
            listing,
            "IF protocol=tcp THEN service = http,smtp\nIF TRUE THEN class = normal\n"
        );
    }

    #[test]
    fn test_prediction_report_fields() {
        let report = prediction_report(&summary(10.0, 3, 1, 0, 1));
        assert!(report.contains("Flagged:            3\n"));
        assert!(report.contains("Unclassified:       1\n"));
        assert!(report.contains("True Positives:     3\n"));
        assert!(report.contains("False Negatives:    1\n"));
        assert!(report.contains("Total:              5\n"));
        assert!(report.contains("Accuracy:           80%\n"));
        assert!(report.contains("Detection Rate:     75%\n"));
        assert!(report.contains("False Alarm Rate:   0%\n"));
    }

    #[test]
    fn test_stdout_line_nan() {
        let line = stdout_line(&summary(1.0, 0, 4, 0, 0));
        assert_eq!(line, "100\tNaN\t0");
        assert_eq!(line.split('\t').count(), 3);
    }

    #[test]
    fn test_sweep_table() {
        let table = sweep_table(&[summary(0.0, 1, 0, 1, 0), summary(5.0, 1, 1, 0, 0)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "0\t50\t100\t100");
        assert_eq!(lines[1], "5\t100\t100\t0");
        assert_eq!(lines[2], "AUC\t1");
    }

    #[test]
    fn test_sweep_table_undefined_auc() {
        let table = sweep_table(&[summary(0.0, 0, 2, 0, 0)]);
        assert!(table.ends_with("AUC\tNaN\n"));
    }
}
