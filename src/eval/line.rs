use crate::align::align;
use crate::models::{LineOutcome, LineStats};

use super::{EvalConfig, EvalError, IdMode};

/// Process one reference/hypothesis line pair
///
/// Tokenizes, strips and checks IDs, folds case, applies the
/// empty-reference policy, aligns, and derives the per-line counts.
/// Returns `None` when the pair is skipped. Pure: corpus state is the
/// accumulator's concern.
pub fn process_line_pair(
    ref_line: &str,
    hyp_line: &str,
    line_number: usize,
    config: &EvalConfig,
) -> Result<Option<LineOutcome>, EvalError> {
    let mut ref_tokens: Vec<String> = ref_line.split_whitespace().map(str::to_string).collect();
    let mut hyp_tokens: Vec<String> = hyp_line.split_whitespace().map(str::to_string).collect();

    let id = match config.id_mode {
        IdMode::None => None,
        IdMode::Head | IdMode::Tail => Some(strip_ids(
            &mut ref_tokens,
            &mut hyp_tokens,
            config.id_mode,
            line_number,
        )?),
    };

    if config.case_insensitive {
        for token in ref_tokens.iter_mut().chain(hyp_tokens.iter_mut()) {
            *token = token.to_lowercase();
        }
    }

    if config.remove_empty_refs && ref_tokens.is_empty() {
        return Ok(None);
    }

    let alignment = align(&ref_tokens, &hyp_tokens);

    // The aligner reports its own match count; recount from the equal ops
    // and require agreement before using either figure.
    let matches = alignment.matched_tokens();
    debug_assert_eq!(matches, alignment.matches);

    let stats = LineStats {
        ref_length: ref_tokens.len(),
        matches,
        errors: alignment.error_tokens(),
    };

    Ok(Some(LineOutcome {
        line_number,
        id,
        ref_tokens,
        hyp_tokens,
        alignment,
        stats,
    }))
}

/// Strip the ID token from both sequences and require the two IDs to agree
fn strip_ids(
    ref_tokens: &mut Vec<String>,
    hyp_tokens: &mut Vec<String>,
    mode: IdMode,
    line_number: usize,
) -> Result<String, EvalError> {
    let ref_id = take_id(ref_tokens, mode).ok_or(EvalError::MissingId {
        line: line_number,
        side: "reference",
    })?;
    let hyp_id = take_id(hyp_tokens, mode).ok_or(EvalError::MissingId {
        line: line_number,
        side: "hypothesis",
    })?;

    if ref_id != hyp_id {
        return Err(EvalError::IdMismatch {
            line: line_number,
            ref_id,
            hyp_id,
        });
    }
    Ok(ref_id)
}

fn take_id(tokens: &mut Vec<String>, mode: IdMode) -> Option<String> {
    match mode {
        IdMode::Head if !tokens.is_empty() => Some(tokens.remove(0)),
        IdMode::Head => None,
        IdMode::Tail => tokens.pop(),
        IdMode::None => None,
    }
}
