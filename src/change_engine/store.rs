//! Progress persistence.
//!
//! Stores are collaborators, not part of scoring. The trainer saves after
//! every transition and ignores failures beyond logging them, so a broken
//! store can never block or change a result.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::change_engine::{error::StoreError, models::Settings, session::SessionSnapshot};

/// Everything persisted for one student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressRecord {
    pub snapshot: SessionSnapshot,
    pub settings: Settings,
}

pub trait ProgressStore {
    /// `Ok(None)` means no record exists yet.
    fn load(&mut self) -> Result<Option<ProgressRecord>, StoreError>;
    fn save(&mut self, record: &ProgressRecord) -> Result<(), StoreError>;
}

impl<S: ProgressStore + ?Sized> ProgressStore for Box<S> {
    fn load(&mut self) -> Result<Option<ProgressRecord>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, record: &ProgressRecord) -> Result<(), StoreError> {
        (**self).save(record)
    }
}

/// In-process store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<ProgressRecord>>>,
}

impl MemoryStore {
    pub fn with_record(record: ProgressRecord) -> Self {
        MemoryStore { slot: Rc::new(RefCell::new(Some(record))) }
    }

    pub fn current(&self) -> Option<ProgressRecord> {
        *self.slot.borrow()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&mut self) -> Result<Option<ProgressRecord>, StoreError> {
        Ok(self.current())
    }

    fn save(&mut self, record: &ProgressRecord) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(*record);
        Ok(())
    }
}

/// Local JSON file, the fallback when no account store is reachable.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&mut self) -> Result<Option<ProgressRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        let record = serde_json::from_str(&text)?;
        debug!(path = %self.path.display(), "loaded progress");
        Ok(Some(record))
    }

    fn save(&mut self, record: &ProgressRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Tries `primary` (e.g. an account-backed store) and falls back to
/// `secondary` whenever it errors.
#[derive(Debug, Clone)]
pub struct FallbackStore<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackStore<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        FallbackStore { primary, secondary }
    }
}

impl<P: ProgressStore, S: ProgressStore> ProgressStore for FallbackStore<P, S> {
    fn load(&mut self) -> Result<Option<ProgressRecord>, StoreError> {
        match self.primary.load() {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!("primary progress store failed to load, using fallback: {e}");
                self.secondary.load()
            }
        }
    }

    fn save(&mut self, record: &ProgressRecord) -> Result<(), StoreError> {
        match self.primary.save(record) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("primary progress store failed to save, using fallback: {e}");
                self.secondary.save(record)
            }
        }
    }
}
