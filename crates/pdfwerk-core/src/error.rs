// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error taxonomy for pdfwerk.
//
// Every failure leaving the engine is one of six kinds. Underlying library
// failures are folded into `Io` (or `Malformed` while opening) with the
// original message kept as diagnostic text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for all pdfwerk operations.
#[derive(Debug, Error)]
pub enum PdfwerkError {
    #[error("input is empty")]
    Empty,

    #[error("malformed PDF: {0}")]
    Malformed(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("pages {start}-{end} are outside the document (1-{page_count})")]
    OutOfRange {
        start: i64,
        end: i64,
        page_count: usize,
    },

    #[error("no valid pages selected")]
    NoValidPages,

    #[error("I/O failure: {0}")]
    Io(String),
}

/// The fixed classification every `PdfwerkError` falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Empty,
    Malformed,
    InvalidInput,
    OutOfRange,
    NoValidPages,
    IoFailure,
}

impl ErrorKind {
    /// Stable snake_case tag, suitable for logs and wire payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Malformed => "malformed",
            Self::InvalidInput => "invalid_input",
            Self::OutOfRange => "out_of_range",
            Self::NoValidPages => "no_valid_pages",
            Self::IoFailure => "io_failure",
        }
    }

    /// Whether the caller can correct the request (as opposed to an
    /// environmental failure worth retrying unchanged).
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Self::IoFailure)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PdfwerkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty => ErrorKind::Empty,
            Self::Malformed(_) => ErrorKind::Malformed,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::NoValidPages => ErrorKind::NoValidPages,
            Self::Io(_) => ErrorKind::IoFailure,
        }
    }
}

impl From<std::io::Error> for PdfwerkError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PdfwerkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(format!("serialization: {err}"))
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PdfwerkError>;
