use std::fmt::Display;
use std::io::{self, Write};

use log::warn;

/// An expected/actual pair whose rendered forms differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub section: String,
    pub expected: String,
    pub actual: String,
}

/// Writes the walkthrough transcript and keeps score of the checks in it.
pub struct Report<W: Write> {
    out: W,
    section: String,
    checks: usize,
    mismatches: Vec<Mismatch>,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            section: String::new(),
            checks: 0,
            mismatches: Vec::new(),
        }
    }

    /// Starts a titled block, separated from the previous one by a blank line.
    pub fn section(&mut self, title: &str) -> io::Result<()> {
        if !self.section.is_empty() {
            writeln!(self.out)?;
        }
        self.section = title.to_string();
        writeln!(self.out, "=== {title} ===")
    }

    /// Prints a labelled value without checking it.
    pub fn note(&mut self, label: &str, value: impl Display) -> io::Result<()> {
        writeln!(self.out, "{label:<9}: {value}")
    }

    /// Prints both values and records a mismatch when their text differs.
    pub fn check(&mut self, expected: impl Display, actual: impl Display) -> io::Result<()> {
        let expected = expected.to_string();
        let actual = actual.to_string();
        writeln!(self.out, "Expected : {expected}")?;
        writeln!(self.out, "Result   : {actual}")?;

        self.checks += 1;
        if expected != actual {
            warn!("[{}] expected {} but got {}", self.section, expected, actual);
            self.mismatches.push(Mismatch {
                section: self.section.clone(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    pub fn checks(&self) -> usize {
        self.checks
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
