//! Error adapter for converting ArmatureError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI. Armature
//! errors carry no source spans (there is no source text to label), so the
//! adapter contributes codes and messages only.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use armature::ArmatureError;
use armature_extract::ExtractError;

/// Adapter wrapping an [`ArmatureError`] for miette rendering.
pub struct ErrorAdapter<'a>(pub &'a ArmatureError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ArmatureError::Io(_) => "armature::io",
            ArmatureError::Extract(ExtractError::Configuration(_)) => "armature::configuration",
            ArmatureError::Extract(ExtractError::Integrity { .. }) => "armature::integrity",
            ArmatureError::Layout(_) => "armature::layout",
            ArmatureError::Serialize(_) => "armature::serialize",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            ArmatureError::Extract(ExtractError::Integrity { .. }) => Some(Box::new(
                "rerun without --strict to emit the diagram with warnings",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert an [`ArmatureError`] into a list of reportable errors.
///
/// Integrity errors yield one reportable per violation so each dangling edge
/// is rendered independently; other variants yield a single reportable.
pub fn to_reportables(err: &ArmatureError) -> Vec<Reportable<'_>> {
    match err {
        ArmatureError::Extract(ExtractError::Integrity { violations }) => violations
            .iter()
            .map(|violation| Reportable::Violation(violation.to_string()))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A single integrity violation out of a strict-mode failure.
    Violation(String),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Violation(message) => write!(f, "{message}"),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Violation(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Violation(_) => Some(Box::new("armature::integrity")),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Violation(_) => Some(Box::new(
                "rerun without --strict to emit the diagram with warnings",
            )),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
