// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// glyphquote-ledger: Persistence collaborators for quotes.
//
// Content-addressed blob storage for uploads and a SQLite order ledger for
// priced quotes. The pricing pipeline never depends on these; the quote
// service calls them after a quote is produced.

pub mod blob;
pub mod integrity;
pub mod orders;

pub use blob::{BlobStore, FsBlobStore, MemoryBlobStore};
pub use integrity::hash_bytes;
pub use orders::{OrderLedger, OrderRecord, SqliteOrderLedger};
