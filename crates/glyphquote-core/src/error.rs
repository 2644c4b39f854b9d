// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Glyphquote.

use thiserror::Error;

/// Top-level error type for all Glyphquote operations.
#[derive(Debug, Error)]
pub enum QuoteError {
    // -- Source extraction --
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to decode image: {0}")]
    DecodeFailure(String),

    #[error("empty PDF document")]
    EmptyDocument,

    #[error("no images or text found in the document")]
    NoContentFound,

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Request parameters --
    #[error("invalid pricing parameters: {0}")]
    InvalidPricingParameters(String),

    #[error("unknown pricing profile: {0}")]
    UnknownProfile(String),

    #[error("invalid target size: {0}")]
    InvalidTarget(String),

    // -- Collaborators --
    #[error("database error: {0}")]
    Database(String),

    #[error("blob storage error: {0}")]
    Storage(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Anything the caller cannot fix --
    #[error("internal error: {0}")]
    Internal(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, QuoteError>;
