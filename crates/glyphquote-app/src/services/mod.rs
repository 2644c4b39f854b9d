// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer: the stateless quote pipeline and the service that binds it
// to blob storage and the order ledger.

pub mod data_dir;
pub mod pipeline;
pub mod quote_service;
