use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::{LineOutcome, OpKind};

use super::EvalConfig;

/// Running corpus-wide totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorpusTotals {
    /// Processed line pairs
    pub sentence_count: u64,
    /// Reference tokens across all processed lines
    pub ref_token_count: u64,
    /// Correctly recognized tokens
    pub match_count: u64,
    /// Insertion, deletion, and substitution errors
    pub error_count: u64,
    /// Lines with at least one error
    pub sent_error_count: u64,
}

/// Frequency tables of which tokens get inserted, dropped, or confused
///
/// Keys accumulate monotonically over a run; the tables are never reset.
#[derive(Debug, Clone, Default)]
pub struct ConfusionTables {
    /// Hypothesis token -> how often it was inserted
    pub insertions: HashMap<String, u64>,
    /// Reference token -> how often it was dropped
    pub deletions: HashMap<String, u64>,
    /// (reference token, hypothesis token) -> how often one replaced the other
    pub substitutions: HashMap<(String, String), u64>,
}

impl ConfusionTables {
    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty() && self.deletions.is_empty() && self.substitutions.is_empty()
    }
}

/// Per-line error rates bucketed by reference length, append-only
#[derive(Debug, Clone, Default)]
pub struct LengthBins {
    bins: BTreeMap<usize, Vec<f64>>,
}

impl LengthBins {
    /// Record one line's error rate under its reference length
    pub fn record(&mut self, ref_length: usize, error_rate: f64) {
        self.bins.entry(ref_length).or_default().push(error_rate);
    }

    /// Bins in ascending length order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[f64])> {
        self.bins.iter().map(|(&len, rates)| (len, rates.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Folds per-line outcomes into corpus totals and the auxiliary tables
///
/// One accumulator per evaluation run; skipped lines never reach it.
/// Memory grows with distinct tokens and lengths seen, not with the
/// number of lines, so unbounded streams are fine.
#[derive(Debug, Clone, Default)]
pub struct CorpusAccumulator {
    track_confusions: bool,
    track_length_bins: bool,
    pub totals: CorpusTotals,
    pub confusions: ConfusionTables,
    pub length_bins: LengthBins,
}

impl CorpusAccumulator {
    pub fn new(config: &EvalConfig) -> Self {
        Self {
            track_confusions: config.track_confusions,
            track_length_bins: config.track_length_bins,
            ..Default::default()
        }
    }

    /// Fold one processed line into the running state
    ///
    /// Call exactly once per outcome, in input order.
    pub fn accumulate(&mut self, outcome: &LineOutcome) {
        let stats = &outcome.stats;
        self.totals.sentence_count += 1;
        self.totals.ref_token_count += stats.ref_length as u64;
        self.totals.match_count += stats.matches as u64;
        self.totals.error_count += stats.errors as u64;
        if stats.errors > 0 {
            self.totals.sent_error_count += 1;
        }

        if self.track_confusions {
            self.record_confusions(outcome);
        }
        if self.track_length_bins {
            self.length_bins.record(stats.ref_length, stats.error_rate());
        }
    }

    fn record_confusions(&mut self, outcome: &LineOutcome) {
        for op in &outcome.alignment.ops {
            match op.kind {
                OpKind::Equal => {}
                OpKind::Insert => {
                    for token in &outcome.hyp_tokens[op.hyp_range.clone()] {
                        *self.confusions.insertions.entry(token.clone()).or_insert(0) += 1;
                    }
                }
                OpKind::Delete => {
                    for token in &outcome.ref_tokens[op.ref_range.clone()] {
                        *self.confusions.deletions.entry(token.clone()).or_insert(0) += 1;
                    }
                }
                // Full cross product: an M-for-N replace yields M*N entries
                OpKind::Replace => {
                    for ref_token in &outcome.ref_tokens[op.ref_range.clone()] {
                        for hyp_token in &outcome.hyp_tokens[op.hyp_range.clone()] {
                            *self
                                .confusions
                                .substitutions
                                .entry((ref_token.clone(), hyp_token.clone()))
                                .or_insert(0) += 1;
                        }
                    }
                }
            }
        }
    }
}
