//! One complete checking run over a source file, and writing its artifacts.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use downcast_engine::{Config, Diagnostic, DiagnosticSink, Engine, Summary};

use crate::edit::apply_edits;
use crate::file::SourceFile;
use crate::scan::Scanner;

/// Prints diagnostics to stderr, compiler style
#[derive(Debug, Default)]
pub struct StderrSink {
    pub quiet: bool,
}

impl DiagnosticSink for StderrSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if !self.quiet {
            eprintln!("{diagnostic}");
        }
    }
}

#[derive(Debug)]
pub struct CheckOutput<S> {
    /// The source with every safe literal replaced
    pub rewritten: String,
    /// The JSON report
    pub report: String,
    pub sink: S,
    pub summary: Summary,
}

pub fn check_source<S: DiagnosticSink>(
    source: &SourceFile,
    config: Config,
    sink: S,
) -> Result<CheckOutput<S>> {
    let scanner = Scanner::new(source)?;
    let outcome = Engine::new(config, sink).run(scanner)?;
    let rewritten = apply_edits(source.text(), &outcome.edits)
        .with_context(|| format!("failed to rewrite {}", source.name()))?;

    Ok(CheckOutput {
        rewritten,
        report: outcome.report,
        sink: outcome.sink,
        summary: outcome.summary,
    })
}

/// Write the rewritten source and the report. Both are written even when no literal
/// was rewritten.
pub fn write_artifacts<S>(output: &CheckOutput<S>, source_path: &Path, report_path: &Path) -> Result<()> {
    fs::write(source_path, output.rewritten.as_bytes())
        .with_context(|| format!("failed to write {}", source_path.display()))?;
    fs::write(report_path, output.report.as_bytes())
        .with_context(|| format!("failed to write {}", report_path.display()))?;
    Ok(())
}
