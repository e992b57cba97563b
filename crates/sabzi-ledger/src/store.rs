//! # Ledger Stores
//!
//! Where the ledger document lives. The ledger hands a store the whole
//! rendered document on every mutation; stores never see partial updates.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  InventoryLedger ──save(text)──► LedgerStore                           │
//! │                                   ├── JsonFileStore  (inventory_data.json)
//! │                                   └── MemoryStore    (embedding, tests) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

/// Default ledger file name.
pub const DEFAULT_LEDGER_FILE: &str = "inventory_data.json";

/// Backing storage for the ledger document.
pub trait LedgerStore {
    /// Returns the stored document, or `None` if nothing has been stored yet.
    fn load(&self) -> LedgerResult<Option<String>>;

    /// Replaces the stored document.
    fn save(&mut self, contents: &str) -> LedgerResult<()>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

// =============================================================================
// JSON File Store
// =============================================================================

/// Stores the document in a single JSON file.
///
/// Writes go to a sibling temp file which is then renamed over the
/// target, so a crash mid-write leaves the previous document intact.
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

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_LEDGER_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        JsonFileStore::new(DEFAULT_LEDGER_FILE)
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> LedgerResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LedgerError::io(&self.path, e)),
        }
    }

    fn save(&mut self, contents: &str) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| LedgerError::io(parent, e))?;
            }
        }

        let temp = self.temp_path();
        let write = || -> io::Result<()> {
            let mut file = fs::File::create(&temp)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp, &self.path)
        };

        if let Err(e) = write() {
            let _ = fs::remove_file(&temp);
            return Err(LedgerError::io(&self.path, e));
        }

        debug!(path = %self.path.display(), bytes = contents.len(), "Ledger written");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// Keeps the document in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Starts with an existing document.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        MemoryStore {
            contents: Some(contents.into()),
            saves: 0,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> LedgerResult<Option<String>> {
        Ok(self.contents.clone())
    }

    fn save(&mut self, contents: &str) -> LedgerResult<()> {
        self.contents = Some(contents.to_string());
        self.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory ledger".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("inventory_data.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip_and_no_temp_left() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("inventory_data.json");
        let mut store = JsonFileStore::new(&path);

        store.save("{\"Ground\": {}}").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("{\"Ground\": {}}"));

        store.save("{}").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("{}"));
        assert!(!path.with_file_name("inventory_data.json.tmp").exists());
    }

    #[test]
    fn test_file_store_write_failure_is_io_error() {
        let dir = TempDir::new().unwrap();
        // The target path is an existing directory, so the rename fails
        let target = dir.path().join("ledger");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let mut store = JsonFileStore::new(&target);
        let err = store.save("{}").unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.save("{}").unwrap();
        assert_eq!(store.contents(), Some("{}"));
        assert_eq!(store.save_count(), 1);
    }
}
