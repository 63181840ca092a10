use std::ops::Range;

use crate::{DowncastMode, DowncastResult};

/// Replace the bytes in `range` of the original source with `text`.
///
/// Edits are plain data; applying them is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementEdit {
    pub range: Range<usize>,
    pub text: String,
}

/// `__<mode>(<downcast>)`, with exactly 8 digits after the decimal point
pub fn replacement_text(downcast: f32, mode: DowncastMode) -> String {
    format!("__{mode}({downcast:.8})")
}

/// An edit replacing the literal at `span`, if the result is safe. Unsafe literals
/// are left alone.
pub fn generate_edit(result: &DowncastResult, span: Range<usize>) -> Option<ReplacementEdit> {
    result.safe.then(|| ReplacementEdit {
        range: span,
        text: replacement_text(result.downcast, result.mode),
    })
}
