//! Applies replacement edits to source text.

use anyhow::{Result, bail};
use downcast_engine::ReplacementEdit;

/// Replace each edit's byte range with its text. Everything outside the edits is copied
/// verbatim. Edits may be given in any order but must not overlap.
pub fn apply_edits(source: &str, edits: &[ReplacementEdit]) -> Result<String> {
    let mut sorted: Vec<&ReplacementEdit> = edits.iter().collect();
    sorted.sort_by_key(|e| (e.range.start, e.range.end));

    let mut out = String::with_capacity(source.len());
    let mut pos = 0;
    for edit in sorted {
        let range = &edit.range;
        if range.start > range.end || range.end > source.len() {
            bail!("edit {range:?} is outside the source ({} bytes)", source.len());
        }
        if !source.is_char_boundary(range.start) || !source.is_char_boundary(range.end) {
            bail!("edit {range:?} splits a character");
        }
        if range.start < pos {
            bail!("edit {range:?} overlaps an earlier edit ending at {pos}");
        }

        out.push_str(&source[pos..range.start]);
        out.push_str(&edit.text);
        pos = range.end;
    }
    out.push_str(&source[pos..]);

    Ok(out)
}
