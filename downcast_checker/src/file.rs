//! Source files, and mapping byte offsets back to lines and columns.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use downcast_engine::SourceLocation;
use relative_path::RelativePath;

pub struct SourceFile {
    name: String,
    text: String,
    // Byte offset of the start of each line
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            name: name.into(),
            text,
            line_starts,
        }
    }

    /// Read `path` (relative to `root`). Locations will name the file by `path`.
    pub fn read(path: &RelativePath, root: &Path) -> Result<Self> {
        let full = path.to_path(root);
        let text = fs::read_to_string(&full)
            .with_context(|| format!("failed to read {}", full.display()))?;
        Ok(Self::new(path.as_str(), text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based line and byte column of `offset`
    pub fn location(&self, offset: usize) -> SourceLocation {
        debug_assert!(offset <= self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let column = offset - self.line_starts[line - 1] + 1;
        SourceLocation::new(self.name.clone(), line, column)
    }
}
