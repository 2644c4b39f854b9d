// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quote service: runs the pipeline, then stores the upload and records the
// order. Rejected uploads are never stored.
//
// Persistence never decides whether a quote succeeds: if storing the upload
// or the order fails, the failure is logged and the quote is returned
// without an order id.

use glyphquote_core::error::Result;
use glyphquote_core::types::TargetSize;
use glyphquote_core::EngineConfig;
use glyphquote_ledger::{BlobStore, OrderLedger, OrderRecord};
use glyphquote_pricing::parse_profile;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::pipeline::{QuoteOutcome, run_pipeline};

/// One quote request as received from the caller.
#[derive(Debug, Clone)]
pub struct QuoteRequest<'a> {
    pub data: &'a [u8],
    /// Declared MIME type of `data`.
    pub media_type: &'a str,
    pub profile: &'a str,
    /// Raw pricing parameters, kept verbatim on the order.
    pub params: &'a serde_json::Value,
    /// Falls back to the configured default target.
    pub target: Option<TargetSize>,
}

/// A completed quote.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    /// `None` when the order could not be recorded.
    pub order_id: Option<Uuid>,
    #[serde(flatten)]
    pub outcome: QuoteOutcome,
}

pub struct QuoteService<B, L> {
    config: EngineConfig,
    blobs: B,
    ledger: L,
}

impl<B: BlobStore, L: OrderLedger> QuoteService<B, L> {
    pub fn new(config: EngineConfig, blobs: B, ledger: L) -> Self {
        Self {
            config,
            blobs,
            ledger,
        }
    }

    /// Quote an upload and record it.
    #[instrument(skip_all, fields(data_len = request.data.len(), profile = request.profile))]
    pub fn quote(&self, request: &QuoteRequest<'_>) -> Result<Quote> {
        let profile = parse_profile(request.profile, request.params)?;
        let target = request.target.unwrap_or(self.config.default_target);

        let outcome = run_pipeline(
            request.data,
            request.media_type,
            target,
            &profile,
            &self.config,
        )?;

        let file_id = match self.blobs.put(request.data) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(error = %e, "failed to store upload");
                None
            }
        };

        let order_id = file_id.and_then(|file_id| {
            let order = OrderRecord::new(
                file_id,
                profile.kind.display_name().to_owned(),
                target,
                request.params.clone(),
                outcome.result.clone(),
            );
            match self.ledger.insert(&order) {
                Ok(()) => Some(order.id),
                Err(e) => {
                    warn!(error = %e, "failed to record order");
                    None
                }
            }
        });

        info!(
            order_id = ?order_id,
            total_price = outcome.result.total_price,
            glyphs = outcome.glyph_count,
            "Quote complete"
        );
        Ok(Quote { order_id, outcome })
    }
}
