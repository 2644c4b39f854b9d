// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `glyphquote files`: fetch and delete stored uploads.

use std::io::Write;
use std::path::Path;

use glyphquote_ledger::BlobStore;
use serde_json::json;

use crate::cli::FilesAction;
use crate::shared::{fail, open_store, print_json};

pub fn run(action: &FilesAction, store: &Path) -> std::result::Result<(), i32> {
    let (blobs, _) = open_store(store)?;

    match action {
        FilesAction::Get { id, out } => {
            let data = blobs.get(id.trim()).map_err(fail)?;
            match out {
                Some(path) => {
                    std::fs::write(path, &data).map_err(|e| fail(e.into()))?;
                    print_json(&json!({ "id": id.trim(), "bytes": data.len(), "out": path }))
                }
                None => std::io::stdout()
                    .lock()
                    .write_all(&data)
                    .map_err(|e| fail(e.into())),
            }
        }
        FilesAction::Delete { id } => {
            blobs.delete(id.trim()).map_err(fail)?;
            print_json(&json!({ "deleted": id.trim() }))
        }
    }
}
