// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Load failures for reference and question sources.
//!
//! None of these are fatal to a run: callers log the error and report the
//! affected section as unavailable.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Reference or question file (or table) is absent
    #[error("{kind} not found at {}", path.display())]
    NotFound { kind: &'static str, path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed row or document
    #[error("malformed {kind} in {}: {message}", path.display())]
    Parse {
        kind: &'static str,
        path: PathBuf,
        message: String,
    },

    /// Source present but yielded no usable records
    #[error("{kind} at {} contains no usable records", path.display())]
    Empty { kind: &'static str, path: PathBuf },

    #[error("lexique query failed: {0}")]
    Database(#[from] rusqlite::Error),

    /// Tokenizer or phrase pattern failed to compile
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl LoadError {
    pub fn parse(kind: &'static str, path: impl Into<PathBuf>, message: impl ToString) -> Self {
        LoadError::Parse {
            kind,
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// True when the source itself was missing, as opposed to present but unusable
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
