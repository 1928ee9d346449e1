use crate::models::{Alignment, AlignmentOp, OpKind};

/// Align a reference token sequence against a hypothesis token sequence
///
/// Classic Levenshtein dynamic program with unit costs and a full
/// backtrace. Adjacent steps of the same kind are merged into ranged ops,
/// so the result partitions both sequences with maximal runs.
pub fn align(reference: &[String], hypothesis: &[String]) -> Alignment {
    let m = reference.len();
    let n = hypothesis.len();
    let width = n + 1;

    // (m+1) x (n+1) cost matrix, row-major
    let mut cost = vec![0usize; (m + 1) * width];
    for j in 0..=n {
        cost[j] = j;
    }
    for i in 1..=m {
        cost[i * width] = i;
        for j in 1..=n {
            let sub = if reference[i - 1] == hypothesis[j - 1] {
                0
            } else {
                1
            };
            let diag = cost[(i - 1) * width + (j - 1)] + sub;
            let del = cost[(i - 1) * width + j] + 1;
            let ins = cost[i * width + (j - 1)] + 1;
            cost[i * width + j] = diag.min(del).min(ins);
        }
    }

    // Walk back from the corner, preferring the diagonal
    let mut steps = Vec::with_capacity(m.max(n));
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        let here = cost[i * width + j];
        if i > 0 && j > 0 {
            let matched = reference[i - 1] == hypothesis[j - 1];
            let sub = if matched { 0 } else { 1 };
            if cost[(i - 1) * width + (j - 1)] + sub == here {
                steps.push(if matched {
                    OpKind::Equal
                } else {
                    OpKind::Replace
                });
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && cost[(i - 1) * width + j] + 1 == here {
            steps.push(OpKind::Delete);
            i -= 1;
        } else {
            steps.push(OpKind::Insert);
            j -= 1;
        }
    }
    steps.reverse();

    let distance = cost[m * width + n];
    let matches = steps.iter().filter(|&&k| k == OpKind::Equal).count();
    Alignment {
        ops: merge_steps(&steps),
        distance,
        matches,
    }
}

/// Coalesce unit steps into maximal same-kind ranged ops
fn merge_steps(steps: &[OpKind]) -> Vec<AlignmentOp> {
    let mut ops: Vec<AlignmentOp> = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    for &kind in steps {
        let (ref_adv, hyp_adv) = match kind {
            OpKind::Equal | OpKind::Replace => (1, 1),
            OpKind::Delete => (1, 0),
            OpKind::Insert => (0, 1),
        };
        match ops.last_mut() {
            Some(last) if last.kind == kind => {
                last.ref_range.end += ref_adv;
                last.hyp_range.end += hyp_adv;
            }
            _ => {
                ops.push(AlignmentOp::new(kind, i..i + ref_adv, j..j + hyp_adv));
            }
        }
        i += ref_adv;
        j += hyp_adv;
    }
    ops
}
