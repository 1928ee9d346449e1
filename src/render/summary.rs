use std::fmt::Write;

use crate::eval::{EvalReport, Rate};
use crate::models::LineOutcome;

use super::DiffLines;

/// Format the corpus-level summary in the classic fixed-width layout
pub fn format_summary(report: &EvalReport) -> String {
    let totals = &report.totals;
    let mut out = String::new();
    let _ = writeln!(out, "Sentence count: {}", totals.sentence_count);
    let _ = writeln!(
        out,
        "WER: {} ({:>10} / {:>10})",
        format_rate(report.metrics.wer),
        totals.error_count,
        totals.ref_token_count
    );
    let _ = writeln!(
        out,
        "WRR: {} ({:>10} / {:>10})",
        format_rate(report.metrics.wrr),
        totals.match_count,
        totals.ref_token_count
    );
    let _ = writeln!(
        out,
        "SER: {} ({:>10} / {:>10})",
        format_rate(report.metrics.ser),
        totals.sent_error_count,
        totals.sentence_count
    );
    out
}

/// A rate as a 10-wide percentage, or "n/a" when its denominator was zero
fn format_rate(rate: Rate) -> String {
    if rate.defined {
        format!("{:>9.3}%", rate.value * 100.0)
    } else {
        format!("{:>10}", "n/a")
    }
}

/// Format the ranked confusion tables, omitting empty sections
pub fn format_confusions(report: &EvalReport) -> String {
    let mut out = String::new();
    if !report.insertions.is_empty() {
        let _ = writeln!(out, "INSERTIONS:");
        for entry in &report.insertions {
            let _ = writeln!(out, "{:<20} {:>10}", entry.token, entry.count);
        }
    }
    if !report.deletions.is_empty() {
        let _ = writeln!(out, "DELETIONS:");
        for entry in &report.deletions {
            let _ = writeln!(out, "{:<20} {:>10}", entry.token, entry.count);
        }
    }
    if !report.substitutions.is_empty() {
        let _ = writeln!(out, "SUBSTITUTIONS:");
        for entry in &report.substitutions {
            let _ = writeln!(
                out,
                "{:<20} -> {:<20}   {:>10}",
                entry.reference, entry.hypothesis, entry.count
            );
        }
    }
    out
}

/// Format the mean error rate per reference length, best lengths first
pub fn format_length_breakdown(report: &EvalReport) -> String {
    let mut out = String::new();
    for row in &report.length_breakdown {
        let _ = writeln!(out, "{:>5} {:.6}", row.length, row.mean_error_rate);
    }
    out.push('\n');
    out
}

/// Format one line pair: its diff, sentence header, and per-line rates
pub fn format_instance(outcome: &LineOutcome, diff: &DiffLines) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", diff.reference_text());
    let _ = writeln!(out, "{}", diff.hypothesis_text());
    match &outcome.id {
        Some(id) => {
            let _ = writeln!(out, "SENTENCE {}  {}", outcome.line_number, id);
        }
        None => {
            let _ = writeln!(out, "SENTENCE {}", outcome.line_number);
        }
    }

    let ref_length = outcome.stats.ref_length;
    // An empty reference has nothing to get wrong
    let (correct_rate, error_rate) = if ref_length > 0 {
        (
            outcome.alignment.matches as f64 / ref_length as f64,
            outcome.alignment.distance as f64 / ref_length as f64,
        )
    } else {
        (1.0, 0.0)
    };
    let _ = writeln!(
        out,
        "Correct          = {:>5.1}%  {:>3}   ({:>6})",
        correct_rate * 100.0,
        outcome.alignment.matches,
        ref_length
    );
    let _ = writeln!(
        out,
        "Errors           = {:>5.1}%  {:>3}   ({:>6})",
        error_rate * 100.0,
        outcome.alignment.distance,
        ref_length
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{process_line_pair, EvalConfig, EvalRun};
    use crate::render::{render_diff, DiffOptions};

    fn one_line_report(ref_line: &str, hyp_line: &str) -> EvalReport {
        let mut run = EvalRun::new(EvalConfig {
            track_confusions: true,
            min_confusion_count: 1,
            ..Default::default()
        });
        run.process_pair(ref_line, hyp_line).unwrap();
        run.finish()
    }

    #[test]
    fn test_summary_layout() {
        let report = one_line_report("the cat sat", "the dog sat");
        let summary = format_summary(&report);
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines[0], "Sentence count: 1");
        assert_eq!(lines[1], "WER:    33.333% (         1 /          3)");
        assert_eq!(lines[2], "WRR:    66.667% (         2 /          3)");
        assert_eq!(lines[3], "SER:   100.000% (         1 /          1)");
    }

    #[test]
    fn test_summary_degenerate_rates() {
        let run = EvalRun::new(EvalConfig::default());
        let summary = format_summary(&run.finish());

        assert!(summary.contains("Sentence count: 0"));
        assert!(summary.contains("WER:        n/a"));
        assert!(summary.contains("SER:        n/a"));
    }

    #[test]
    fn test_confusions_sections() {
        let report = one_line_report("the cat sat", "the dog sat");
        let text = format_confusions(&report);

        assert!(!text.contains("INSERTIONS:"));
        assert!(!text.contains("DELETIONS:"));
        assert!(text.contains("SUBSTITUTIONS:"));
        assert!(text.contains("cat                  -> dog"));
    }

    #[test]
    fn test_instance_format() {
        let outcome = process_line_pair("the cat sat", "the dog sat", 1, &EvalConfig::default())
            .unwrap()
            .unwrap();
        let diff = render_diff(
            &outcome.alignment,
            &outcome.ref_tokens,
            &outcome.hyp_tokens,
            &DiffOptions::default(),
        );
        let text = format_instance(&outcome, &diff);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "REF: the CAT sat");
        assert_eq!(lines[1], "HYP: the DOG sat");
        assert_eq!(lines[2], "SENTENCE 1");
        assert_eq!(lines[3], "Correct          =  66.7%    2   (     3)");
        assert_eq!(lines[4], "Errors           =  33.3%    1   (     3)");
    }

    #[test]
    fn test_instance_with_id() {
        let config = EvalConfig {
            id_mode: crate::eval::IdMode::Head,
            ..Default::default()
        };
        let outcome = process_line_pair("U1 a", "U1 a", 4, &config).unwrap().unwrap();
        let diff = render_diff(
            &outcome.alignment,
            &outcome.ref_tokens,
            &outcome.hyp_tokens,
            &DiffOptions::default(),
        );
        let text = format_instance(&outcome, &diff);

        assert!(text.contains("SENTENCE 4  U1"));
    }

    #[test]
    fn test_instance_empty_reference() {
        let outcome = process_line_pair("", "noise", 1, &EvalConfig::default())
            .unwrap()
            .unwrap();
        let diff = render_diff(
            &outcome.alignment,
            &outcome.ref_tokens,
            &outcome.hyp_tokens,
            &DiffOptions::default(),
        );
        let text = format_instance(&outcome, &diff);

        assert!(text.contains("Correct          = 100.0%"));
        assert!(text.contains("Errors           =   0.0%"));
    }

    #[test]
    fn test_length_breakdown_rows() {
        let mut run = EvalRun::new(EvalConfig {
            track_length_bins: true,
            ..Default::default()
        });
        run.process_pair("a b", "a b").unwrap();
        run.process_pair("c", "x").unwrap();
        let text = format_length_breakdown(&run.finish());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "    2 0.000000");
        assert_eq!(lines[1], "    1 1.000000");
    }
}
