// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Store directory resolution.

use std::path::{Path, PathBuf};

/// Database file inside a store directory.
pub const ORDERS_DB: &str = "orders.db";
/// Blob subdirectory inside a store directory.
pub const BLOBS_DIR: &str = "blobs";

/// The store directory: `explicit` when given, else the user data dir.
pub fn store_dir(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => base_data_dir().join("glyphquote"),
    }
}

fn base_data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    PathBuf::from("/tmp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        assert_eq!(store_dir(Some(Path::new("/srv/quotes"))), PathBuf::from("/srv/quotes"));
    }

    #[test]
    fn default_dir_is_namespaced() {
        assert!(store_dir(None).ends_with("glyphquote"));
    }
}
