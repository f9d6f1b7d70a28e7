//! Resolve a command's input to a blob cache and key.
//!
//! A local file is staged into an in-memory cache under a fresh key, the
//! way an upload handler would place it. A `--key` is looked up in the
//! configured cache directory.

use crate::cli::InputArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use clausewise_extractor::{BlobCache, BlobValue, CacheError, FsBlobCache, MemoryBlobCache};
use tracing::debug;
use uuid::Uuid;

/// Cache holding the contract for one command
#[derive(Debug, Clone)]
pub enum SourceCache {
    /// A staged local file
    Memory(MemoryBlobCache),
    /// The configured cache directory
    Fs(FsBlobCache),
}

impl BlobCache for SourceCache {
    type Error = CacheError;

    async fn get(&self, key: &str) -> std::result::Result<Option<BlobValue>, Self::Error> {
        match self {
            SourceCache::Memory(cache) => cache.get(key).await,
            SourceCache::Fs(cache) => cache.get(key).await,
        }
    }
}

/// Build the cache for `input` and return the key to read.
pub async fn resolve_input(input: &InputArgs, config: &Config) -> Result<(SourceCache, String)> {
    match (&input.file, &input.key) {
        (Some(path), None) => {
            let bytes = tokio::fs::read(path).await.map_err(|e| {
                CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
            })?;

            let key = format!("upload-{}", Uuid::now_v7());
            debug!(path = %path.display(), key = %key, bytes = bytes.len(), "Staged local file");

            let cache = MemoryBlobCache::new();
            cache.insert(key.clone(), BlobValue::Bytes(bytes));
            Ok((SourceCache::Memory(cache), key))
        }
        (None, Some(key)) => {
            let dir = config.cache.dir.as_ref().ok_or_else(|| {
                CliError::Config("--key requires [cache] dir in the configuration".into())
            })?;
            Ok((SourceCache::Fs(FsBlobCache::new(dir)), key.clone()))
        }
        _ => Err(CliError::InvalidInput(
            "Provide either a FILE or --key".to_string(),
        )),
    }
}
