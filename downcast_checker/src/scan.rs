//! Produces the floating literals of a source file, in order, for the engine to pull.

use std::ops::Range;

use anyhow::{Context, Result};
use downcast_engine::LiteralOccurrence;
use log::debug;

use crate::file::SourceFile;
use crate::grammar::{c_lexer, parse_float_literal};

pub struct Scanner<'a> {
    source: &'a SourceFile,
    numbers: std::vec::IntoIter<Range<usize>>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a SourceFile) -> Result<Self> {
        let numbers = c_lexer::pp_numbers(source.text())
            .with_context(|| format!("failed to lex {}", source.name()))?;
        Ok(Self {
            source,
            numbers: numbers.into_iter(),
        })
    }
}

impl Iterator for Scanner<'_> {
    type Item = LiteralOccurrence;

    fn next(&mut self) -> Option<LiteralOccurrence> {
        for span in self.numbers.by_ref() {
            let text = &self.source.text()[span.clone()];
            match parse_float_literal(text) {
                Some(lit) => {
                    return Some(LiteralOccurrence {
                        value: lit.value,
                        location: self.source.location(span.start),
                        span,
                    });
                }
                None => debug!(
                    "{:?}: {text:?} is not a floating literal",
                    self.source.location(span.start)
                ),
            }
        }
        None
    }
}
