//! "Free analysis used" flag
//!
//! Read once when a view mounts and written at most once, after the first
//! completed analysis. Writing the flag twice leaves the same state, so
//! stores need no coordination beyond their own file lock.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::{DiscoveryError, Result};

pub const FREE_ANALYSIS_KEY: &str = "hasUsedFreeAnalysis";

/// Local key/value storage for boolean flags
pub trait FlagStore: Send + Sync {
    fn get(&self, key: &str) -> Result<bool>;

    fn set(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    flags: Mutex<HashSet<String>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> Result<bool> {
        Ok(self.flags.lock().contains(key))
    }

    fn set(&self, key: &str) -> Result<()> {
        self.flags.lock().insert(key.to_string());
        Ok(())
    }
}

/// Flags kept as a JSON object in a single file
#[derive(Debug)]
pub struct FileFlagStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileFlagStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, bool>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            DiscoveryError::FlagStore(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            DiscoveryError::FlagStore(format!("failed to parse {}: {}", self.path.display(), e))
        })
    }

    fn write(&self, flags: &BTreeMap<String, bool>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                DiscoveryError::FlagStore(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
        let content = serde_json::to_string_pretty(flags)
            .map_err(|e| DiscoveryError::FlagStore(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| {
            DiscoveryError::FlagStore(format!("failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl FlagStore for FileFlagStore {
    fn get(&self, key: &str) -> Result<bool> {
        let _guard = self.lock.lock();
        Ok(self.read()?.get(key).copied().unwrap_or(false))
    }

    fn set(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut flags = self.read()?;
        if flags.get(key).copied().unwrap_or(false) {
            return Ok(());
        }
        flags.insert(key.to_string(), true);
        self.write(&flags)
    }
}

/// Whether the one-time free analysis has been used
pub struct FreeAnalysisFlag {
    store: Arc<dyn FlagStore>,
    used: AtomicBool,
}

impl FreeAnalysisFlag {
    /// Read the stored flag
    pub fn load(store: Arc<dyn FlagStore>) -> Result<Self> {
        let used = store.get(FREE_ANALYSIS_KEY)?;
        debug!(used, "Loaded free analysis flag");
        Ok(Self {
            store,
            used: AtomicBool::new(used),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryFlagStore::new()),
            used: AtomicBool::new(false),
        }
    }

    pub fn is_used(&self) -> bool {
        self.used.load(Ordering::Acquire)
    }

    /// Returns `true` if this call marked the flag
    pub fn mark_used(&self) -> Result<bool> {
        if self.used.swap(true, Ordering::AcqRel) {
            return Ok(false);
        }
        if let Err(e) = self.store.set(FREE_ANALYSIS_KEY) {
            self.used.store(false, Ordering::Release);
            return Err(e);
        }
        info!("Free analysis marked as used");
        Ok(true)
    }
}

impl std::fmt::Debug for FreeAnalysisFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreeAnalysisFlag")
            .field("used", &self.is_used())
            .finish()
    }
}
