//! Ordered, append-only collection of per-literal results, serialized once at the end
//! of a run.

use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

use crate::{DowncastResult, Result};

#[derive(Debug, Default)]
pub struct Report {
    entries: Vec<DowncastResult>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, result: DowncastResult) {
        self.entries.push(result);
    }

    pub fn entries(&self) -> &[DowncastResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize every entry, in recording order, as a pretty-printed JSON array.
    ///
    /// Consumes the report, so it can only be finalized once.
    pub fn finalize(self) -> Result<String> {
        let entries: Vec<_> = self.entries.iter().map(ReportEntry::from).collect();
        let mut doc = serde_json::to_string_pretty(&entries)?;
        doc.push('\n');
        Ok(doc)
    }
}

#[derive(Serialize)]
struct ReportEntry {
    value: Fixed6,
    downcast: Fixed6,
    error: Fixed6,
    mode: &'static str,
    safe: bool,
    location: String,
}

impl From<&DowncastResult> for ReportEntry {
    fn from(r: &DowncastResult) -> Self {
        Self {
            value: Fixed6(r.original),
            downcast: Fixed6(f64::from(r.downcast)),
            error: Fixed6(r.relative_error),
            mode: r.mode.name(),
            safe: r.safe,
            location: r.location.to_string(),
        }
    }
}

/// A number written with exactly 6 decimals. JSON has no infinities, so non-finite
/// values become `null`.
struct Fixed6(f64);

impl Serialize for Fixed6 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if !self.0.is_finite() {
            return serializer.serialize_none();
        }
        let raw = RawValue::from_string(format!("{:.6}", self.0)).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}
