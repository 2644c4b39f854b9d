// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blob storage for uploaded files, addressed by content hash.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use glyphquote_core::error::{QuoteError, Result};
use tracing::{debug, info, instrument};

use crate::integrity::{hash_bytes, is_content_id, verify_content};

/// Stores upload bytes and hands back an opaque id.
pub trait BlobStore {
    /// Store `data`, returning its id. Storing the same bytes twice yields the
    /// same id.
    fn put(&self, data: &[u8]) -> Result<String>;

    fn get(&self, id: &str) -> Result<Vec<u8>>;

    /// Remove a blob. Fails with `NotFound` when no blob has this id.
    fn delete(&self, id: &str) -> Result<()>;
}

fn not_found(id: &str) -> QuoteError {
    QuoteError::NotFound(format!("blob {id}"))
}

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

/// One file per blob, named by its SHA-256 hex digest.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Use `root` as the blob directory, creating it if needed.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root).map_err(|e| {
            QuoteError::Storage(format!("create blob dir {}: {e}", root.display()))
        })?;
        info!("blob store opened");
        Ok(Self { root })
    }

    fn path_for(&self, id: &str) -> Result<PathBuf> {
        if is_content_id(id) {
            Ok(self.root.join(id))
        } else {
            Err(not_found(id))
        }
    }
}

impl BlobStore for FsBlobStore {
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    fn put(&self, data: &[u8]) -> Result<String> {
        let id = hash_bytes(data);
        let path = self.root.join(&id);

        if !path.exists() {
            std::fs::write(&path, data)?;
            debug!(%id, "blob written");
        }
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Vec<u8>> {
        let path = self.path_for(id)?;
        let data = match std::fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found(id)),
            Err(e) => return Err(e.into()),
        };
        verify_content(&data, id)?;
        Ok(data)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let path = self.path_for(id)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!(%id, "blob deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found(id)),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local store for tests and one-shot runs.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.blobs
            .lock()
            .map_err(|_| QuoteError::Internal("blob store lock poisoned".into()))
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, data: &[u8]) -> Result<String> {
        let id = hash_bytes(data);
        self.lock()?
            .entry(id.clone())
            .or_insert_with(|| data.to_vec());
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Vec<u8>> {
        self.lock()?.get(id).cloned().ok_or_else(|| not_found(id))
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.lock()?.remove(id).map(|_| ()).ok_or_else(|| not_found(id))
    }
}
