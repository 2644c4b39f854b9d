// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glyphquote: quote fabricated letters from an uploaded logo or PDF.
//
// Entry point. Initialises logging, loads the engine configuration, and
// dispatches to the subcommand.

mod cli;
mod files_cmd;
mod orders_cmd;
mod quote_cmd;
mod services;
mod shared;

use clap::Parser;
use cli::{Cli, Commands};
use quote_cmd::QuoteArgs;
use services::data_dir::store_dir;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "Glyphquote starting");

    let result = shared::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Quote {
            ref file,
            ref profile,
            ref params,
            length,
            height,
            ref media_type,
            ref store,
        } => quote_cmd::run(
            &QuoteArgs {
                file,
                profile,
                params: params.as_deref(),
                length,
                height,
                media_type: media_type.as_deref(),
                store: store.as_deref(),
            },
            config,
        ),
        Commands::Orders {
            ref action,
            ref store,
        } => orders_cmd::run(action, &store_dir(store.as_deref())),
        Commands::Files {
            ref action,
            ref store,
        } => files_cmd::run(action, &store_dir(store.as_deref())),
    });

    if let Err(code) = result {
        std::process::exit(code);
    }
}
