// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Unified diff rendering
//!
//! Line-oriented diff between the previous and current snapshot texts,
//! labelled `previous`/`current`, with a fixed number of context lines
//! around each changed region.

/// Returned when digests differ but no line-level difference exists
/// (e.g. the change is invisible to line-based comparison)
pub const UNRENDERABLE_CHANGE: &str =
    "(content changed, but no line-level difference could be rendered)";

/// Context lines surrounding each changed region
const CONTEXT_LINES: usize = 3;

/// Above this many table cells the LCS is skipped and the diff degrades
/// to full replacement
const MAX_LCS_CELLS: usize = 4_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op<'a> {
    Equal(&'a str),
    Delete(&'a str),
    Insert(&'a str),
}

/// Render a unified diff between two texts
///
/// Returns [`UNRENDERABLE_CHANGE`] when the line-based algorithm finds
/// nothing to show, which the caller interprets as "changed, but not
/// representable as a line diff".
pub fn unified_diff(previous: &str, current: &str) -> String {
    let old: Vec<&str> = previous.lines().collect();
    let new: Vec<&str> = current.lines().collect();

    let ops = diff_ops(&old, &new);
    if ops.iter().all(|op| matches!(op, Op::Equal(_))) {
        return UNRENDERABLE_CHANGE.to_string();
    }
    render_hunks(&ops)
}

/// Line-level edit script via longest common subsequence
fn diff_ops<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<Op<'a>> {
    let (n, m) = (old.len(), new.len());

    if n.saturating_mul(m) > MAX_LCS_CELLS {
        let mut ops = Vec::with_capacity(n + m);
        ops.extend(old.iter().copied().map(Op::Delete));
        ops.extend(new.iter().copied().map(Op::Insert));
        return ops;
    }

    // lcs[i * (m + 1) + j] = LCS length of old[i..] and new[j..]
    let width = m + 1;
    let mut lcs = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i * width + j] = if old[i] == new[j] {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            ops.push(Op::Equal(old[i]));
            i += 1;
            j += 1;
        } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
            ops.push(Op::Delete(old[i]));
            i += 1;
        } else {
            ops.push(Op::Insert(new[j]));
            j += 1;
        }
    }
    ops.extend(old[i..].iter().copied().map(Op::Delete));
    ops.extend(new[j..].iter().copied().map(Op::Insert));
    ops
}

/// Group the edit script into context-bounded hunks and format them
fn render_hunks(ops: &[Op]) -> String {
    // Running old/new line counts before each op index
    let mut old_pos = Vec::with_capacity(ops.len() + 1);
    let mut new_pos = Vec::with_capacity(ops.len() + 1);
    let (mut o, mut n) = (0usize, 0usize);
    for op in ops {
        old_pos.push(o);
        new_pos.push(n);
        match op {
            Op::Equal(_) => {
                o += 1;
                n += 1;
            }
            Op::Delete(_) => o += 1,
            Op::Insert(_) => n += 1,
        }
    }
    old_pos.push(o);
    new_pos.push(n);

    // Merge changed regions whose context windows touch
    let mut hunks: Vec<(usize, usize)> = Vec::new();
    for (idx, op) in ops.iter().enumerate() {
        if matches!(op, Op::Equal(_)) {
            continue;
        }
        let lo = idx.saturating_sub(CONTEXT_LINES);
        let hi = (idx + CONTEXT_LINES + 1).min(ops.len());
        match hunks.last_mut() {
            Some(last) if lo <= last.1 => last.1 = last.1.max(hi),
            _ => hunks.push((lo, hi)),
        }
    }

    let mut out = String::from("--- previous\n+++ current\n");
    for (lo, hi) in hunks {
        let old_count = old_pos[hi] - old_pos[lo];
        let new_count = new_pos[hi] - new_pos[lo];
        let old_start = if old_count == 0 { old_pos[lo] } else { old_pos[lo] + 1 };
        let new_start = if new_count == 0 { new_pos[lo] } else { new_pos[lo] + 1 };
        out.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            old_start, old_count, new_start, new_count
        ));
        for op in &ops[lo..hi] {
            match op {
                Op::Equal(line) => {
                    out.push(' ');
                    out.push_str(line);
                }
                Op::Delete(line) => {
                    out.push('-');
                    out.push_str(line);
                }
                Op::Insert(line) => {
                    out.push('+');
                    out.push_str(line);
                }
            }
            out.push('\n');
        }
    }
    out
}
