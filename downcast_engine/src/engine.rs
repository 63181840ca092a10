//! The per-run loop: evaluate, classify, maybe rewrite, record.
//!
//! An [`Engine`] owns everything a run mutates (the report, the pending edits and the
//! diagnostic sink) and reads its [`Config`] without ever changing it. Literals are
//! pulled from an iterator one at a time and fully processed before the next.

use log::{debug, info};

use crate::{
    Config, DiagnosticSink, DowncastMode, LiteralOccurrence, ReplacementEdit, Report, Result,
    SourceLocation, Tier, classify, diagnostics_for, generate_edit, simulate,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DowncastResult {
    pub original: f64,
    pub downcast: f32,
    pub relative_error: f64,
    pub mode: DowncastMode,
    pub safe: bool,
    pub tier: Tier,
    pub location: SourceLocation,
}

/// Simulate and classify a single literal. Pure: equal inputs give equal results.
pub fn evaluate(literal: &LiteralOccurrence, config: &Config) -> DowncastResult {
    let mode = config.mode();
    // Narrowing to f32 first is part of the simulated conversion
    let downcast = simulate(literal.value as f32, mode);
    let c = classify(literal.value, downcast, config.threshold());

    DowncastResult {
        original: literal.value,
        downcast,
        relative_error: c.relative_error,
        mode,
        safe: c.safe,
        tier: c.tier,
        location: literal.location.clone(),
    }
}

/// Number of literals per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub exact: usize,
    pub within_threshold: usize,
    pub over_threshold: usize,
}

impl Summary {
    fn count(&mut self, tier: Tier) {
        match tier {
            Tier::Exact => self.exact += 1,
            Tier::SafeWithError => self.within_threshold += 1,
            Tier::Unsafe => self.over_threshold += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.exact + self.within_threshold + self.over_threshold
    }
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct Outcome<S> {
    /// The serialized report
    pub report: String,
    /// Edits for the safe literals, in source order
    pub edits: Vec<ReplacementEdit>,
    pub sink: S,
    pub summary: Summary,
}

pub struct Engine<S: DiagnosticSink> {
    config: Config,
    report: Report,
    edits: Vec<ReplacementEdit>,
    sink: S,
    summary: Summary,
}

impl<S: DiagnosticSink> Engine<S> {
    pub fn new(config: Config, sink: S) -> Self {
        Self {
            config,
            report: Report::new(),
            edits: Vec::new(),
            sink,
            summary: Summary::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn edits(&self) -> &[ReplacementEdit] {
        &self.edits
    }

    /// Process one literal and return the recorded result.
    pub fn process(&mut self, literal: LiteralOccurrence) -> &DowncastResult {
        let result = evaluate(&literal, &self.config);
        debug!(
            "{:?}: {} -> {} ({:?}, error {:e})",
            result.location, result.original, result.downcast, result.tier, result.relative_error
        );

        for diagnostic in diagnostics_for(&result, self.config.threshold()) {
            self.sink.emit(diagnostic);
        }

        if let Some(edit) = generate_edit(&result, literal.span) {
            self.edits.push(edit);
        }

        self.summary.count(result.tier);
        self.report.record(result);
        &self.report.entries()[self.report.len() - 1]
    }

    /// Drain `literals` in order, then finish the run.
    pub fn run<I>(mut self, literals: I) -> Result<Outcome<S>>
    where
        I: IntoIterator<Item = LiteralOccurrence>,
    {
        for literal in literals {
            self.process(literal);
        }
        self.finish()
    }

    /// Serialize the report. Consumes the engine, so this happens exactly once.
    pub fn finish(self) -> Result<Outcome<S>> {
        let summary = self.summary;
        info!(
            "{} literals: {} exact, {} within threshold, {} unsafe ({})",
            summary.total(),
            summary.exact,
            summary.within_threshold,
            summary.over_threshold,
            self.config.mode()
        );

        Ok(Outcome {
            report: self.report.finalize()?,
            edits: self.edits,
            sink: self.sink,
            summary,
        })
    }
}
