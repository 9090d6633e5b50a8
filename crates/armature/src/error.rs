//! Error types for Armature operations.
//!
//! This module provides the main error type [`ArmatureError`] which wraps
//! the error conditions that can occur while turning a schema into a
//! positioned diagram.

use std::io;

use thiserror::Error;

use armature_extract::ExtractError;

/// The main error type for Armature operations.
#[derive(Debug, Error)]
pub enum ArmatureError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}
