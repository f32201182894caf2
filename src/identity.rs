use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::error::ClientError;

/// Storage key the identity is filed under, matching what the original
/// deployment persisted in browser storage
pub const IDENTITY_KEY: &str = "serp_user_id";

/// Durable pseudo-identity for this installation
///
/// The identity is an opaque token correlating requests to server-side usage
/// accounting. It is advisory only (rate-limit bucketing), never a security
/// boundary: synthesis is timestamp-plus-random, so collisions across
/// installations are possible and tolerated.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store backed by the default platform data directory
    pub fn default_location() -> Self {
        Self::new(default_identity_path())
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the stored identity, creating and persisting one first if none
    /// exists
    ///
    /// Idempotent: while a stored value exists it is returned unchanged, so
    /// consecutive calls always agree. A value is never regenerated except
    /// through [`reset`](Self::reset).
    pub fn resolve(&self) -> Result<String, ClientError> {
        if let Some(existing) = self.read()? {
            ::log::debug!("Reusing stored identity: {}", existing);
            return Ok(existing);
        }

        let fresh = synthesize_identity();
        self.write(&fresh)?;
        ::log::info!("Created new identity: {}", fresh);
        Ok(fresh)
    }

    /// Discard the stored identity so the next resolve creates a fresh one
    pub fn reset(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                ::log::info!("Discarded stored identity");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(e)),
        }
    }

    fn read(&self) -> Result<Option<String>, ClientError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClientError::Storage(e)),
        };

        // An unreadable file is treated as absent; the identity is advisory,
        // so resynthesizing beats failing the bootstrap
        match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
            Ok(map) => Ok(map.get(IDENTITY_KEY).cloned()),
            Err(e) => {
                ::log::warn!("Ignoring unreadable identity file: {}", e);
                Ok(None)
            }
        }
    }

    fn write(&self, identity: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(ClientError::Storage)?;
        }

        let mut map = BTreeMap::new();
        map.insert(IDENTITY_KEY.to_string(), identity.to_string());
        let contents = serde_json::to_string(&map)
            .map_err(|e| ClientError::Storage(std::io::Error::other(e)))?;

        fs::write(&self.path, contents).map_err(ClientError::Storage)
    }
}

/// Default backing file under the platform data directory
fn default_identity_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("serp-check")
        .join("identity.json")
}

/// Synthesize a new identity from the current timestamp and a random suffix
fn synthesize_identity() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix = rand::rng().random_range(0..10_000);
    format!("user_{}_{}", millis, suffix)
}
