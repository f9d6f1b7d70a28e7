//! Blob cache seam: where uploaded contract bytes are read from

use crate::error::ExtractionError;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::debug;

/// A value as returned by the blob cache
///
/// Cache layers do not agree on how binary data comes back: some return raw
/// bytes, some serialize a buffer as `{"type": "Buffer", "data": [...]}`.
#[derive(Debug, Clone, PartialEq)]
pub enum BlobValue {
    /// Raw binary buffer
    Bytes(Vec<u8>),

    /// Structured value, valid only in the tagged buffer shape
    Json(Value),

    /// Plain text; never a valid upload
    Text(String),
}

impl BlobValue {
    /// Decode into a byte buffer, rejecting every shape but the two buffer forms
    pub fn into_bytes(self) -> Result<Vec<u8>, ExtractionError> {
        match self {
            BlobValue::Bytes(bytes) => Ok(bytes),
            BlobValue::Json(value) => decode_tagged_buffer(&value),
            BlobValue::Text(_) => Err(ExtractionError::InvalidData(
                "expected a binary buffer, found text".to_string(),
            )),
        }
    }
}

fn decode_tagged_buffer(value: &Value) -> Result<Vec<u8>, ExtractionError> {
    let invalid = |reason: &str| ExtractionError::InvalidData(reason.to_string());

    let obj = value
        .as_object()
        .ok_or_else(|| invalid("expected a buffer object"))?;
    if obj.get("type").and_then(Value::as_str) != Some("Buffer") {
        return Err(invalid("object is not tagged as a Buffer"));
    }
    let data = obj
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("buffer object has no data array"))?;

    data.iter()
        .map(|byte| {
            byte.as_u64()
                .and_then(|b| u8::try_from(b).ok())
                .ok_or_else(|| invalid("buffer data contains a non-byte value"))
        })
        .collect()
}

/// Errors raised by the bundled cache implementations
#[derive(Error, Debug)]
pub enum CacheError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key cannot be mapped onto the store
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Read-only access to the transient upload cache
pub trait BlobCache: Send + Sync {
    /// Error type for cache reads
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the value stored under `key`, or `None` when absent
    fn get(&self, key: &str)
        -> impl Future<Output = Result<Option<BlobValue>, Self::Error>> + Send;
}

/// In-process cache, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobCache {
    entries: Arc<RwLock<HashMap<String, BlobValue>>>,
}

impl MemoryBlobCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing any previous one
    pub fn insert(&self, key: impl Into<String>, value: BlobValue) {
        // The map stays consistent across a panicking writer
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.into(), value);
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobCache for MemoryBlobCache {
    type Error = CacheError;

    async fn get(&self, key: &str) -> Result<Option<BlobValue>, Self::Error> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }
}

/// Directory-backed cache
///
/// `<dir>/<key>` holds raw bytes. `<dir>/<key>.json` holds a value written
/// by a layer that serializes buffers as JSON objects.
#[derive(Debug, Clone)]
pub struct FsBlobCache {
    dir: PathBuf,
}

impl FsBlobCache {
    /// Cache rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        if key.is_empty()
            || key.contains(['/', '\\'])
            || key == "."
            || key == ".."
        {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, CacheError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl BlobCache for FsBlobCache {
    type Error = CacheError;

    async fn get(&self, key: &str) -> Result<Option<BlobValue>, Self::Error> {
        let path = self.entry_path(key)?;

        if let Some(bytes) = read_optional(&path).await? {
            debug!(key, bytes = bytes.len(), "Blob cache hit");
            return Ok(Some(BlobValue::Bytes(bytes)));
        }

        let json_path = path.with_file_name(format!("{}.json", key));
        match read_optional(&json_path).await? {
            Some(raw) => {
                debug!(key, "Blob cache hit (json)");
                Ok(Some(BlobValue::Json(serde_json::from_slice(&raw)?)))
            }
            None => Ok(None),
        }
    }
}
