// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Quote fabricated letters from an uploaded logo, photo or PDF.
#[derive(Debug, Parser)]
#[command(name = "glyphquote", about, version)]
pub struct Cli {
    /// Engine configuration (JSON). Defaults apply when omitted
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Segment, scale and price the glyphs in a file
    Quote {
        /// Image (PNG, JPEG) or PDF to quote
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Pricing profile, e.g. 'Aluminium Doosletter' or 'Profiel 3 LUX'
        #[arg(long)]
        profile: String,

        /// Pricing parameters as JSON, e.g. '{"thickness_pricing": 5, "colors": ["red"]}'
        #[arg(long)]
        params: Option<String>,

        /// Target overall length. Default from config
        #[arg(long)]
        length: Option<u32>,

        /// Target height. Default from config
        #[arg(long)]
        height: Option<u32>,

        /// Declared MIME type. Inferred from the file extension when omitted
        #[arg(long)]
        media_type: Option<String>,

        /// Store the upload and record the order in this directory
        #[arg(long, value_name = "DIR")]
        store: Option<PathBuf>,
    },

    /// Inspect recorded orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,

        /// Store directory. Default: the user data directory
        #[arg(long, global = true, value_name = "DIR")]
        store: Option<PathBuf>,
    },

    /// Fetch or delete stored uploads
    Files {
        #[command(subcommand)]
        action: FilesAction,

        /// Store directory. Default: the user data directory
        #[arg(long, global = true, value_name = "DIR")]
        store: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum OrdersAction {
    /// List all orders, newest first
    List,
    /// Show one order
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Delete one order
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum FilesAction {
    /// Write a stored upload to a file, or to stdout
    Get {
        #[arg(value_name = "ID")]
        id: String,

        /// Output file. Default: stdout
        #[arg(long, short, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Delete a stored upload
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quote_with_options() {
        let cli = Cli::try_parse_from([
            "glyphquote",
            "--config",
            "engine.json",
            "quote",
            "logo.png",
            "--profile",
            "Profiel 4",
            "--params",
            r#"{"plexi_size": 10}"#,
            "--length",
            "300",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("engine.json")));
        match cli.command {
            Commands::Quote {
                file,
                profile,
                length,
                height,
                store,
                ..
            } => {
                assert_eq!(file, PathBuf::from("logo.png"));
                assert_eq!(profile, "Profiel 4");
                assert_eq!((length, height), (Some(300), None));
                assert!(store.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_orders_subcommands() {
        let cli = Cli::try_parse_from(["glyphquote", "orders", "show", "abc", "--store", "/tmp/q"])
            .unwrap();
        match cli.command {
            Commands::Orders {
                action: OrdersAction::Show { id },
                store,
            } => {
                assert_eq!(id, "abc");
                assert_eq!(store, Some(PathBuf::from("/tmp/q")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_files_get() {
        let cli = Cli::try_parse_from(["glyphquote", "files", "get", "abc", "-o", "logo.png"])
            .unwrap();
        match cli.command {
            Commands::Files {
                action: FilesAction::Get { id, out },
                store,
            } => {
                assert_eq!(id, "abc");
                assert_eq!(out, Some(PathBuf::from("logo.png")));
                assert!(store.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn profile_is_required() {
        assert!(Cli::try_parse_from(["glyphquote", "quote", "logo.png"]).is_err());
    }
}
