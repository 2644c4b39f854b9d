// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Helpers shared by the subcommands: config loading, store opening, output,
// and turning errors into exit codes.

use std::path::Path;

use glyphquote_core::EngineConfig;
use glyphquote_core::error::QuoteError;
use glyphquote_core::outcome::classify;
use glyphquote_ledger::{FsBlobStore, SqliteOrderLedger};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::services::data_dir::{BLOBS_DIR, ORDERS_DB};

/// Exit status for failures the caller can fix.
pub const EXIT_CLIENT: i32 = 2;
/// Exit status for internal failures.
pub const EXIT_INTERNAL: i32 = 1;

/// Report `err` on stderr as an `ErrorOutcome` and pick the exit status.
pub fn fail(err: QuoteError) -> i32 {
    let outcome = classify(&err);
    if outcome.is_client_error() {
        warn!(error = %err, "request rejected");
    } else {
        error!(error = %err, "internal failure");
    }

    match serde_json::to_string(&outcome) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("{}", outcome.message),
    }

    if outcome.is_client_error() {
        EXIT_CLIENT
    } else {
        EXIT_INTERNAL
    }
}

pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, i32> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_json_file(path).map_err(fail)?;
            info!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Open the blob store and order ledger under `dir`.
pub fn open_store(dir: &Path) -> Result<(FsBlobStore, SqliteOrderLedger), i32> {
    std::fs::create_dir_all(dir).map_err(|e| fail(e.into()))?;
    let blobs = FsBlobStore::open(dir.join(BLOBS_DIR)).map_err(fail)?;
    let ledger = SqliteOrderLedger::open(dir.join(ORDERS_DB)).map_err(fail)?;
    Ok((blobs, ledger))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), i32> {
    let json = serde_json::to_string_pretty(value).map_err(|e| fail(e.into()))?;
    println!("{json}");
    Ok(())
}
