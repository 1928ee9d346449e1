pub mod accumulator;
pub mod line;
pub mod metrics;
pub mod report;

pub use accumulator::*;
pub use line::*;
pub use metrics::*;
pub use report::*;

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::LineOutcome;

/// Where the line identifier sits, if the transcript files carry one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdMode {
    /// No identifier token
    #[default]
    None,
    /// Identifier is the first token (Kaldi convention)
    Head,
    /// Identifier is the last token (Sphinx convention)
    Tail,
}

/// Configuration for one evaluation run
///
/// Built once, passed by reference, never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct EvalConfig {
    /// Fold all tokens to lowercase before comparison
    pub case_insensitive: bool,
    /// Skip line pairs whose reference is empty
    pub remove_empty_refs: bool,
    /// Identifier extraction mode
    pub id_mode: IdMode,
    /// Populate the insertion/deletion/substitution tables
    pub track_confusions: bool,
    /// Record per-line error rates bucketed by reference length
    pub track_length_bins: bool,
    /// Minimum count for an entry to appear in the confusion report
    pub min_confusion_count: u64,
}

/// Errors that terminate an evaluation run
#[derive(Error, Debug)]
pub enum EvalError {
    /// Reference and hypothesis files are misaligned; not recoverable
    #[error(
        "reference and hypothesis IDs do not match at line {line}: \
         ref=\"{ref_id}\" hyp=\"{hyp_id}\" \
         (lines in the hyp file should match those in the ref file)"
    )]
    IdMismatch {
        line: usize,
        ref_id: String,
        hyp_id: String,
    },

    /// An ID mode is configured but the line has no token to strip
    #[error("{side} line {line} is empty, cannot extract an ID token")]
    MissingId { line: usize, side: &'static str },

    /// Reading an input line failed
    #[error("failed to read input line: {0}")]
    Read(#[from] io::Error),
}

/// Context owning all mutable state for a single evaluation run
///
/// Independent runs use independent `EvalRun` values; there is no shared
/// state between them.
pub struct EvalRun {
    config: EvalConfig,
    accumulator: CorpusAccumulator,
    line_number: usize,
}

impl EvalRun {
    pub fn new(config: EvalConfig) -> Self {
        let accumulator = CorpusAccumulator::new(&config);
        Self {
            config,
            accumulator,
            line_number: 0,
        }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Process and accumulate one reference/hypothesis line pair
    ///
    /// Returns the line's outcome, or `None` when the pair was skipped
    /// under the empty-reference policy.
    pub fn process_pair(
        &mut self,
        ref_line: &str,
        hyp_line: &str,
    ) -> Result<Option<LineOutcome>, EvalError> {
        self.line_number += 1;
        let outcome = process_line_pair(ref_line, hyp_line, self.line_number, &self.config)?;
        match &outcome {
            Some(outcome) => self.accumulator.accumulate(outcome),
            None => debug!(line = self.line_number, "skipped empty reference"),
        }
        Ok(outcome)
    }

    /// Finalize the run into an immutable report
    pub fn finish(self) -> EvalReport {
        EvalReport::from_accumulator(&self.accumulator, self.config.min_confusion_count)
    }
}

/// Evaluate two line streams pairwise and return the final report
///
/// Consumes the streams in lockstep and stops at the end of the shorter
/// one without error. Lines are processed strictly in input order and
/// never buffered.
pub fn evaluate<R, H>(ref_lines: R, hyp_lines: H, config: &EvalConfig) -> Result<EvalReport, EvalError>
where
    R: IntoIterator<Item = io::Result<String>>,
    H: IntoIterator<Item = io::Result<String>>,
{
    let mut run = EvalRun::new(config.clone());
    for (ref_line, hyp_line) in ref_lines.into_iter().zip(hyp_lines) {
        run.process_pair(&ref_line?, &hyp_line?)?;
    }
    Ok(run.finish())
}
