use std::fmt;
use std::ops::Range;

/// Where a literal starts, as shown to the user.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: String,
    /// 1-based
    pub line: usize,
    /// 1-based, in bytes
    pub column: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

/// `file:line, col N`, the form used in the report
impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}, col {}", self.file, self.line, self.column)
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A floating-point literal found in source text.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralOccurrence {
    pub value: f64,
    pub location: SourceLocation,
    /// Byte range of the whole token, suffix included
    pub span: Range<usize>,
}
