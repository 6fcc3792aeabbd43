//! Identity Stores
//!
//! Persisted client state holding a single key. The file store survives
//! across runs; the memory store is shared by every clone within one
//! process.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::{Identity, SessionError, SessionResult};

/// Key the identity is stored under
pub const IDENTITY_KEY: &str = "username";

/// Storage for the display identity
pub trait IdentityStore {
    /// Read the identity, `None` when nobody is logged in
    fn load(&self) -> SessionResult<Option<Identity>>;

    /// Replace the stored identity
    fn save(&self, identity: &Identity) -> SessionResult<()>;

    /// Remove the identity. Succeeds when nothing is stored.
    fn clear(&self) -> SessionResult<()>;
}

/// Identity kept as a plain-text file named after [`IDENTITY_KEY`]
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    /// Store inside `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(IDENTITY_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self) -> SessionResult<Option<Identity>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(Identity::new(content))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::Io(e)),
        }
    }

    fn save(&self, identity: &Identity) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, identity.as_str())?;
        tracing::debug!(path = ?self.path, "Identity saved");
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = ?self.path, "Identity cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io(e)),
        }
    }
}

/// Process-wide identity slot; clones share the same value
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityStore {
    slot: Arc<Mutex<Option<Identity>>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `identity`
    pub fn with_identity(identity: impl Into<Identity>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(identity.into()))),
        }
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> SessionResult<Option<Identity>> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        Ok(slot.clone())
    }

    fn save(&self, identity: &Identity) -> SessionResult<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        *slot = Some(identity.clone());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}
