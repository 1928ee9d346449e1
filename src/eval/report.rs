use std::collections::HashMap;

use serde::Serialize;

use super::{compute_metrics, CorpusAccumulator, CorpusTotals, LengthBins, Metrics};

/// One insertion or deletion table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionEntry {
    pub token: String,
    pub count: u64,
}

/// One substitution table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubstitutionEntry {
    pub reference: String,
    pub hypothesis: String,
    pub count: u64,
}

/// Mean error rate observed at one reference length
#[derive(Debug, Clone, Serialize)]
pub struct LengthBinRow {
    pub length: usize,
    /// NaN when the bin holds no samples
    pub mean_error_rate: f64,
    pub samples: usize,
}

/// Immutable end-of-run snapshot of everything the run produced
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub totals: CorpusTotals,
    pub metrics: Metrics,
    /// Ranked insertion entries meeting the count threshold
    pub insertions: Vec<ConfusionEntry>,
    /// Ranked deletion entries meeting the count threshold
    pub deletions: Vec<ConfusionEntry>,
    /// Ranked substitution entries meeting the count threshold
    pub substitutions: Vec<SubstitutionEntry>,
    /// Mean error rate per reference length, best lengths first
    pub length_breakdown: Vec<LengthBinRow>,
}

impl EvalReport {
    /// Assemble the final report from a finished accumulator
    pub fn from_accumulator(acc: &CorpusAccumulator, min_confusion_count: u64) -> Self {
        Self {
            totals: acc.totals,
            metrics: compute_metrics(&acc.totals),
            insertions: rank_confusions(&acc.confusions.insertions, min_confusion_count),
            deletions: rank_confusions(&acc.confusions.deletions, min_confusion_count),
            substitutions: rank_substitutions(&acc.confusions.substitutions, min_confusion_count),
            length_breakdown: length_vs_error_rows(&acc.length_bins),
        }
    }
}

/// Rank a single-token confusion table
///
/// Entries with count >= `min_count`, sorted by count descending; ties
/// broken by token so the output is deterministic.
pub fn rank_confusions(table: &HashMap<String, u64>, min_count: u64) -> Vec<ConfusionEntry> {
    let mut entries: Vec<ConfusionEntry> = table
        .iter()
        .filter(|&(_, &count)| count >= min_count)
        .map(|(token, &count)| ConfusionEntry {
            token: token.clone(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)));
    entries
}

/// Rank the substitution table with the same ordering rule
pub fn rank_substitutions(
    table: &HashMap<(String, String), u64>,
    min_count: u64,
) -> Vec<SubstitutionEntry> {
    let mut entries: Vec<SubstitutionEntry> = table
        .iter()
        .filter(|&(_, &count)| count >= min_count)
        .map(|((reference, hypothesis), &count)| SubstitutionEntry {
            reference: reference.clone(),
            hypothesis: hypothesis.clone(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.reference.cmp(&b.reference))
            .then_with(|| a.hypothesis.cmp(&b.hypothesis))
    });
    entries
}

/// Mean error rate per reference length, sorted by (mean, length) ascending
pub fn length_vs_error_rows(bins: &LengthBins) -> Vec<LengthBinRow> {
    let mut rows: Vec<LengthBinRow> = bins
        .iter()
        .map(|(length, rates)| LengthBinRow {
            length,
            mean_error_rate: mean(rates),
            samples: rates.len(),
        })
        .collect();
    rows.sort_by(|a, b| {
        a.mean_error_rate
            .total_cmp(&b.mean_error_rate)
            .then_with(|| a.length.cmp(&b.length))
    });
    rows
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        f64::NAN
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_confusions_orders_and_filters() {
        let mut table = HashMap::new();
        table.insert("uh".to_string(), 5);
        table.insert("the".to_string(), 2);
        table.insert("a".to_string(), 2);
        table.insert("rare".to_string(), 1);

        let ranked = rank_confusions(&table, 2);
        let tokens: Vec<&str> = ranked.iter().map(|e| e.token.as_str()).collect();

        // Count descending, lexicographic tiebreak, threshold applied.
        assert_eq!(tokens, vec!["uh", "a", "the"]);
    }

    #[test]
    fn test_rank_substitutions_tiebreak() {
        let mut table = HashMap::new();
        table.insert(("cat".to_string(), "bat".to_string()), 3);
        table.insert(("cat".to_string(), "hat".to_string()), 3);
        table.insert(("ant".to_string(), "aunt".to_string()), 3);

        let ranked = rank_substitutions(&table, 0);
        assert_eq!(ranked[0].reference, "ant");
        assert_eq!(ranked[1].hypothesis, "bat");
        assert_eq!(ranked[2].hypothesis, "hat");
    }

    #[test]
    fn test_length_rows_sorted_by_mean_then_length() {
        let mut bins = LengthBins::default();
        bins.record(5, 0.2);
        bins.record(5, 0.4);
        bins.record(3, 0.3);
        bins.record(8, 0.1);

        let rows = length_vs_error_rows(&bins);
        let order: Vec<(usize, f64)> = rows.iter().map(|r| (r.length, r.mean_error_rate)).collect();

        assert_eq!(order.len(), 3);
        assert_eq!(order[0].0, 8);
        assert_eq!(order[1].0, 3);
        assert_eq!(order[2].0, 5);
        assert!((order[2].1 - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_infinite_rates_sort_last() {
        let mut bins = LengthBins::default();
        bins.record(0, f64::INFINITY);
        bins.record(4, 0.5);

        let rows = length_vs_error_rows(&bins);
        assert_eq!(rows[0].length, 4);
        assert!(rows[1].mean_error_rate.is_infinite());
    }

    #[test]
    fn test_mean_of_empty_is_nan() {
        assert!(mean(&[]).is_nan());
        assert_eq!(mean(&[0.25, 0.75]), 0.5);
    }
}
