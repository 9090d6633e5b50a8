//! Error types for the extraction pass.
//!
//! Only two conditions abort a pass: a configuration problem (no usable
//! module in the schema) and, in strict mode, a failed integrity check.
//! Everything else is logged and skipped, so one unreflectable field, one
//! unresolved relation target, or one unreadable method body never costs
//! the whole diagram.

use std::fmt;

use thiserror::Error;

use armature_core::identifier::Ptr;

/// Error type for the extraction pass.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The schema root or its designated module is missing or empty.
    /// Fatal; no partial diagram is returned.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// One or more edges reference nodes that are not part of the diagram.
    /// Raised only when strict integrity checking is enabled.
    #[error("diagram failed integrity check with {} violation(s)", violations.len())]
    Integrity {
        violations: Vec<IntegrityViolation>,
    },
}

/// Which endpoint of an edge is dangling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

/// An edge endpoint referencing a node that does not exist in the diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityViolation {
    /// The offending edge.
    pub edge: Ptr,
    /// Which endpoint dangles.
    pub endpoint: Endpoint,
    /// The referenced node id that was not found.
    pub missing: Ptr,
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "edge {} references missing {} node {}",
            self.edge, self.endpoint, self.missing
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display() {
        let err = ExtractError::Configuration("module 'shared' not found".to_string());

        assert_eq!(
            err.to_string(),
            "configuration error: module 'shared' not found"
        );
    }

    #[test]
    fn test_integrity_display_counts_violations() {
        let violation = IntegrityViolation {
            edge: Ptr::nil(),
            endpoint: Endpoint::Target,
            missing: Ptr::nil(),
        };
        let err = ExtractError::Integrity {
            violations: vec![violation.clone(), violation],
        };

        assert_eq!(
            err.to_string(),
            "diagram failed integrity check with 2 violation(s)"
        );
    }

    #[test]
    fn test_violation_display_names_endpoint() {
        let violation = IntegrityViolation {
            edge: Ptr::nil(),
            endpoint: Endpoint::Source,
            missing: Ptr::nil(),
        };

        assert!(violation.to_string().contains("missing source node"));
    }
}
