pub mod align;
pub mod eval;
pub mod io;
pub mod models;
pub mod render;

pub use align::align;
pub use eval::{
    compute_metrics, evaluate, process_line_pair, rank_confusions, rank_substitutions,
    length_vs_error_rows, ConfusionEntry, ConfusionTables, CorpusAccumulator, CorpusTotals,
    EvalConfig, EvalError, EvalReport, EvalRun, IdMode, LengthBinRow, LengthBins, Metrics, Rate,
    SubstitutionEntry,
};
pub use io::{open_lines, write_json_report};
pub use models::{Alignment, AlignmentOp, LineOutcome, LineStats, OpKind};
pub use render::{
    format_confusions, format_instance, format_length_breakdown, format_summary, render_diff,
    DiffLines, DiffOptions, DiffToken,
};
