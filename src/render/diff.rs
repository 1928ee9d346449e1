use crate::models::{Alignment, OpKind};

/// Labels wrapped around the two rendered lines
#[derive(Debug, Clone)]
pub struct DiffOptions<'a> {
    pub ref_prefix: Option<&'a str>,
    pub hyp_prefix: Option<&'a str>,
    pub ref_suffix: Option<&'a str>,
    pub hyp_suffix: Option<&'a str>,
}

impl Default for DiffOptions<'_> {
    fn default() -> Self {
        Self {
            ref_prefix: Some("REF:"),
            hyp_prefix: Some("HYP:"),
            ref_suffix: None,
            hyp_suffix: None,
        }
    }
}

/// One rendered token with its semantic span marker
///
/// `emphasized` marks tokens that belong to an error op; whether that
/// becomes color, bold, or nothing at all is the output adapter's call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffToken {
    pub text: String,
    pub emphasized: bool,
}

impl DiffToken {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    fn marked(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// Two parallel token-aligned views of one aligned line pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLines {
    pub reference: Vec<DiffToken>,
    pub hypothesis: Vec<DiffToken>,
}

impl DiffLines {
    /// Reference side as plain space-joined text
    pub fn reference_text(&self) -> String {
        join(&self.reference)
    }

    /// Hypothesis side as plain space-joined text
    pub fn hypothesis_text(&self) -> String {
        join(&self.hypothesis)
    }
}

fn join(tokens: &[DiffToken]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render an alignment as a Sphinx-style two-line diff
///
/// Matched tokens come out lowercase; errors come out uppercase with
/// asterisk fillers standing in for the missing side, sized so the two
/// lines stay visually token-aligned.
pub fn render_diff(
    alignment: &Alignment,
    ref_tokens: &[String],
    hyp_tokens: &[String],
    options: &DiffOptions,
) -> DiffLines {
    let mut reference = Vec::new();
    let mut hypothesis = Vec::new();

    for op in &alignment.ops {
        let ref_group = &ref_tokens[op.ref_range.clone()];
        let hyp_group = &hyp_tokens[op.hyp_range.clone()];
        match op.kind {
            OpKind::Equal => {
                for token in ref_group {
                    reference.push(DiffToken::plain(token.to_lowercase()));
                }
                for token in hyp_group {
                    hypothesis.push(DiffToken::plain(token.to_lowercase()));
                }
            }
            OpKind::Delete => {
                for token in ref_group {
                    reference.push(DiffToken::marked(token.to_uppercase()));
                    hypothesis.push(DiffToken::marked(filler(token)));
                }
            }
            OpKind::Insert => {
                for token in hyp_group {
                    reference.push(DiffToken::marked(filler(token)));
                    hypothesis.push(DiffToken::marked(token.to_uppercase()));
                }
            }
            OpKind::Replace => {
                render_replace(ref_group, hyp_group, &mut reference, &mut hypothesis);
            }
        }
    }

    if let Some(prefix) = options.ref_prefix {
        reference.insert(0, DiffToken::plain(prefix));
    }
    if let Some(prefix) = options.hyp_prefix {
        hypothesis.insert(0, DiffToken::plain(prefix));
    }
    if let Some(suffix) = options.ref_suffix {
        reference.push(DiffToken::plain(suffix));
    }
    if let Some(suffix) = options.hyp_suffix {
        hypothesis.push(DiffToken::plain(suffix));
    }

    DiffLines {
        reference,
        hypothesis,
    }
}

/// Pair up substituted tokens slot by slot, padding the shorter group
fn render_replace(
    ref_group: &[String],
    hyp_group: &[String],
    reference: &mut Vec<DiffToken>,
    hypothesis: &mut Vec<DiffToken>,
) {
    let slots = ref_group.len().max(hyp_group.len());
    for slot in 0..slots {
        match (ref_group.get(slot), hyp_group.get(slot)) {
            (Some(ref_token), Some(hyp_token)) => {
                let mut ref_text = ref_token.to_uppercase();
                let mut hyp_text = hyp_token.to_uppercase();
                let ref_width = width(&ref_text);
                let hyp_width = width(&hyp_text);
                // Right-pad the narrower token so the columns line up
                if ref_width < hyp_width {
                    ref_text.push_str(&" ".repeat(hyp_width - ref_width));
                } else if hyp_width < ref_width {
                    hyp_text.push_str(&" ".repeat(ref_width - hyp_width));
                }
                reference.push(DiffToken::marked(ref_text));
                hypothesis.push(DiffToken::marked(hyp_text));
            }
            (Some(ref_token), None) => {
                reference.push(DiffToken::marked(ref_token.to_uppercase()));
                hypothesis.push(DiffToken::marked(filler(ref_token)));
            }
            (None, Some(hyp_token)) => {
                reference.push(DiffToken::marked(filler(hyp_token)));
                hypothesis.push(DiffToken::marked(hyp_token.to_uppercase()));
            }
            (None, None) => {}
        }
    }
}

fn filler(counterpart: &str) -> String {
    "*".repeat(width(counterpart))
}

/// Display width in characters, not bytes
fn width(text: &str) -> usize {
    text.chars().count()
}
