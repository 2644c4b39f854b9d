// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `glyphquote quote`: price one file.

use std::path::Path;

use glyphquote_core::EngineConfig;
use glyphquote_core::error::{QuoteError, Result};
use glyphquote_core::types::{MediaKind, PricingResult, TargetSize};
use glyphquote_pricing::parse_profile;
use serde::Serialize;
use uuid::Uuid;

use crate::services::pipeline::run_pipeline;
use crate::services::quote_service::{QuoteRequest, QuoteService};
use crate::shared::{fail, open_store, print_json};

/// Options of the `quote` subcommand.
pub struct QuoteArgs<'a> {
    pub file: &'a Path,
    pub profile: &'a str,
    pub params: Option<&'a str>,
    pub length: Option<u32>,
    pub height: Option<u32>,
    pub media_type: Option<&'a str>,
    pub store: Option<&'a Path>,
}

/// What the command prints on success.
#[derive(Debug, Serialize)]
struct QuoteOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    order_id: Option<Uuid>,
    #[serde(flatten)]
    result: &'a PricingResult,
}

pub fn run(args: &QuoteArgs<'_>, config: EngineConfig) -> std::result::Result<(), i32> {
    let data = std::fs::read(args.file).map_err(|e| fail(e.into()))?;
    let media_type = declared_media_type(args).map_err(fail)?;
    let params = parse_params(args.params).map_err(fail)?;
    let target = TargetSize::new(
        args.length.unwrap_or(config.default_target.length),
        args.height.unwrap_or(config.default_target.height),
    )
    .map_err(fail)?;

    match args.store {
        None => {
            let profile = parse_profile(args.profile, &params).map_err(fail)?;
            let outcome =
                run_pipeline(&data, &media_type, target, &profile, &config).map_err(fail)?;
            print_json(&QuoteOutput {
                order_id: None,
                result: &outcome.result,
            })
        }
        Some(dir) => {
            let (blobs, ledger) = open_store(dir)?;
            let service = QuoteService::new(config, blobs, ledger);
            let quote = service
                .quote(&QuoteRequest {
                    data: &data,
                    media_type: &media_type,
                    profile: args.profile,
                    params: &params,
                    target: Some(target),
                })
                .map_err(fail)?;
            print_json(&QuoteOutput {
                order_id: quote.order_id,
                result: &quote.outcome.result,
            })
        }
    }
}

/// The declared MIME type, or the one implied by the file extension.
fn declared_media_type(args: &QuoteArgs<'_>) -> Result<String> {
    if let Some(mime) = args.media_type {
        return Ok(mime.to_owned());
    }
    args.file
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(MediaKind::from_extension)
        .map(|kind| kind.mime_type().to_owned())
        .ok_or_else(|| {
            QuoteError::UnsupportedFormat(format!(
                "cannot infer media type of {}",
                args.file.display()
            ))
        })
}

fn parse_params(raw: Option<&str>) -> Result<serde_json::Value> {
    match raw {
        None => Ok(serde_json::Value::Null),
        Some(text) => serde_json::from_str(text).map_err(|e| {
            QuoteError::InvalidPricingParameters(format!("parameters are not valid JSON: {e}"))
        }),
    }
}
