// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the editor core.
//!
//! Every variant is a caller contract violation. Nothing here is transient,
//! so errors are returned immediately and never retried.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// A bar lookup fell outside `[0, len)`
    #[error("bar index {index} out of range (bar count {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// An operation was called in a state that cannot honor it
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl EditorError {
    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        EditorError::InvalidState(message.into())
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
