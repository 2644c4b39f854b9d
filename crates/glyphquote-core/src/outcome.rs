// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Caller-facing error outcomes.
//
// Every `QuoteError` is classified as either something the client can fix by
// sending different input, or an internal failure. Internal failures are
// reported with an opaque message so decoder or database details never leak
// to the caller.

use serde::Serialize;

use crate::error::QuoteError;

/// Who is expected to act on a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Bad or unsupported input; resubmitting with changes can succeed.
    Client,
    /// Unexpected failure inside the service.
    Internal,
}

/// A failure rendered for the transport layer.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutcome {
    pub kind: OutcomeKind,
    /// HTTP-equivalent status code (4xx for client, 500 for internal).
    pub status: u16,
    /// Message safe to show to the caller.
    pub message: String,
}

impl ErrorOutcome {
    pub fn is_client_error(&self) -> bool {
        self.kind == OutcomeKind::Client
    }
}

const INTERNAL_MESSAGE: &str = "internal error";

/// Classify a `QuoteError` into a transport-ready outcome.
pub fn classify(err: &QuoteError) -> ErrorOutcome {
    match err {
        QuoteError::UnsupportedFormat(_)
        | QuoteError::DecodeFailure(_)
        | QuoteError::EmptyDocument
        | QuoteError::NoContentFound
        | QuoteError::PdfError(_)
        | QuoteError::InvalidPricingParameters(_)
        | QuoteError::UnknownProfile(_)
        | QuoteError::InvalidTarget(_) => ErrorOutcome {
            kind: OutcomeKind::Client,
            status: 400,
            message: err.to_string(),
        },

        QuoteError::NotFound(_) => ErrorOutcome {
            kind: OutcomeKind::Client,
            status: 404,
            message: err.to_string(),
        },

        QuoteError::Database(_)
        | QuoteError::Storage(_)
        | QuoteError::Io(_)
        | QuoteError::Serialization(_)
        | QuoteError::Internal(_) => ErrorOutcome {
            kind: OutcomeKind::Internal,
            status: 500,
            message: INTERNAL_MESSAGE.into(),
        },
    }
}
