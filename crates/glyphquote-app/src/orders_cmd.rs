// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `glyphquote orders`: list, show and delete recorded orders.

use std::path::Path;

use glyphquote_core::error::{QuoteError, Result};
use glyphquote_ledger::OrderLedger;
use serde_json::json;
use uuid::Uuid;

use crate::cli::OrdersAction;
use crate::shared::{fail, open_store, print_json};

pub fn run(action: &OrdersAction, store: &Path) -> std::result::Result<(), i32> {
    let (_, ledger) = open_store(store)?;

    match action {
        OrdersAction::List => print_json(&ledger.list().map_err(fail)?),
        OrdersAction::Show { id } => {
            let id = parse_order_id(id).map_err(fail)?;
            let order = ledger
                .get(&id)
                .and_then(|order| order.ok_or_else(|| QuoteError::NotFound(format!("order {id}"))))
                .map_err(fail)?;
            print_json(&order)
        }
        OrdersAction::Delete { id } => {
            let id = parse_order_id(id).map_err(fail)?;
            ledger.delete(&id).map_err(fail)?;
            print_json(&json!({ "deleted": id }))
        }
    }
}

/// A malformed id cannot name an existing order.
fn parse_order_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| QuoteError::NotFound(format!("order {raw}")))
}
