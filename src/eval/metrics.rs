use serde::Serialize;

use super::CorpusTotals;

/// A ratio together with whether its denominator was positive
///
/// A zero denominator yields value 0.0 with `defined` false; reporting
/// layers must not present that as a genuine zero error rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rate {
    pub value: f64,
    pub defined: bool,
}

impl Rate {
    fn ratio(numerator: u64, denominator: u64) -> Self {
        if denominator > 0 {
            Self {
                value: numerator as f64 / denominator as f64,
                defined: true,
            }
        } else {
            Self {
                value: 0.0,
                defined: false,
            }
        }
    }
}

/// Corpus-level accuracy metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// Word error rate: errors / reference tokens
    pub wer: Rate,
    /// Word recognition rate: matches / reference tokens
    pub wrr: Rate,
    /// Sentence error rate: sentences with errors / sentences
    pub ser: Rate,
}

/// Derive the final metrics from accumulated totals
///
/// Pure and idempotent; no rounding is applied here, display formatting
/// is the reporting layer's concern.
pub fn compute_metrics(totals: &CorpusTotals) -> Metrics {
    Metrics {
        wer: Rate::ratio(totals.error_count, totals.ref_token_count),
        wrr: Rate::ratio(totals.match_count, totals.ref_token_count),
        ser: Rate::ratio(totals.sent_error_count, totals.sentence_count),
    }
}
