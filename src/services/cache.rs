use crate::error::{Result, WsawError};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

/// Raw key-value store behind [`Cache`].
///
/// Every error is fatal for the invocation: a cache that cannot be read or
/// written means the result set cannot be trusted.
pub trait CacheStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn store(&self, key: &str, value: &[u8]) -> Result<()>;
    /// When `key` was last stored, if it exists.
    fn modified(&self, key: &str) -> Result<Option<DateTime<Utc>>>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// One file per key under a cache directory. Age comes from the file's
/// modification time.
pub struct LocalFsCache {
    root: PathBuf,
}

impl LocalFsCache {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| WsawError::cache("create", &root.to_string_lossy(), e))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl CacheStore for LocalFsCache {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WsawError::cache("load", key, e)),
        }
    }

    fn store(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path_for(key);
        let tmp = self.root.join(format!(".{key}.{}.tmp", std::process::id()));
        fs::write(&tmp, value).map_err(|e| WsawError::cache("store", key, e))?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            WsawError::cache("store", key, e)
        })
    }

    fn modified(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        match fs::metadata(self.path_for(key)).and_then(|m| m.modified()) {
            Ok(t) => Ok(Some(DateTime::<Utc>::from(t))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WsawError::cache("stat", key, e)),
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WsawError::cache("remove", key, e)),
        }
    }
}

/// In-process store. Timestamps can be backdated to simulate expiry.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (Vec<u8>, DateTime<Utc>)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `key` was stored at `when`.
    pub fn set_modified(&self, key: &str, when: DateTime<Utc>) {
        if let Ok(mut entries) = self.entries.lock() {
            if let Some(entry) = entries.get_mut(key) {
                entry.1 = when;
            }
        }
    }

    fn entries(
        &self,
        op: &'static str,
        key: &str,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, (Vec<u8>, DateTime<Utc>)>>> {
        self.entries
            .lock()
            .map_err(|_| WsawError::cache(op, key, io::Error::new(io::ErrorKind::Other, "poisoned")))
    }
}

impl CacheStore for MemoryCache {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries("load", key)?.get(key).map(|(v, _)| v.clone()))
    }

    fn store(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries("store", key)?
            .insert(key.to_string(), (value.to_vec(), Utc::now()));
        Ok(())
    }

    fn modified(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.entries("stat", key)?.get(key).map(|(_, t)| *t))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries("remove", key)?.remove(key);
        Ok(())
    }
}

/// Typed access on top of a [`CacheStore`].
pub struct Cache<S> {
    store: S,
}

impl<S: CacheStore> Cache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.load(key)
    }

    pub fn store(&self, key: &str, value: &[u8]) -> Result<()> {
        self.store.store(key, value)
    }

    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.load(key)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| WsawError::cache("decode", key, io::Error::new(io::ErrorKind::InvalidData, e))),
            None => Ok(None),
        }
    }

    pub fn store_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.store.store(key, &bytes)
    }

    /// Whether `key` exists and is younger than `ttl`. A zero `ttl` is never
    /// fresh.
    pub fn is_fresh(&self, key: &str, ttl: Duration) -> Result<bool> {
        if ttl.is_zero() {
            return Ok(false);
        }
        let Some(modified) = self.store.modified(key)? else {
            return Ok(false);
        };
        // Timestamps from the future count as just written.
        let age = (Utc::now() - modified).to_std().unwrap_or(Duration::ZERO);
        Ok(age < ttl)
    }

    /// Return the cached value when fresh, otherwise compute, store and
    /// return it. A zero `ttl` always recomputes but still stores.
    pub async fn load_or_store_json<T, F, Fut>(&self, key: &str, ttl: Duration, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if self.is_fresh(key, ttl)? {
            if let Some(value) = self.load_json(key)? {
                log::debug!("cache hit for `{key}`");
                return Ok(value);
            }
        }

        log::debug!("cache miss for `{key}`, recomputing");
        let value = compute().await?;
        self.store_json(key, &value)?;
        Ok(value)
    }
}

/// Hex SHA-256 of a page body, used to detect content changes.
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
