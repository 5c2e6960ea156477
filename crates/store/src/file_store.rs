//! JSON-file-backed credential store
//!
//! The whole table is held in memory and written back as one document on
//! every successful append. Appends are rare (admin provisioning), so the
//! full rewrite stays cheap; the atomic temp-file-and-rename replace keeps
//! the on-disk document intact across crashes.

use crate::traits::{AddOutcome, CredentialStore};
use parking_lot::{Mutex, RwLock};
use redeemd_core::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

type Table = HashMap<String, Vec<String>>;

/// Durable path -> codes multimap persisted as a JSON document
pub struct FileStore {
    location: PathBuf,
    table: RwLock<Table>,
    /// Serializes writers so the document on disk is written in mutation
    /// order. Readers never take this lock.
    persist: Mutex<()>,
}

impl FileStore {
    /// Open the store at `location`, creating an empty document if the file
    /// does not exist yet. Calling this repeatedly is safe; existing content
    /// is never altered by the bootstrap.
    pub fn open(location: impl Into<PathBuf>) -> Result<Self> {
        let location = location.into();

        let table = if location.exists() {
            Self::load(&location)?
        } else {
            write_atomic(&location, b"{}\n")?;
            Table::new()
        };

        info!(
            store = %location.display(),
            paths = table.len(),
            "credential store opened"
        );

        Ok(Self {
            location,
            table: RwLock::new(table),
            persist: Mutex::new(()),
        })
    }

    fn load(path: &Path) -> Result<Table> {
        let bytes =
            fs::read(path).map_err(|e| Error::file_system(path, "read store file", e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Table::new());
        }
        serde_json::from_slice(&bytes).map_err(Error::from)
    }

    fn write_snapshot(&self, snapshot: &Table) -> Result<()> {
        let mut doc = serde_json::to_vec_pretty(snapshot)?;
        doc.push(b'\n');
        write_atomic(&self.location, &doc)
    }

    /// Location of the backing file
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }
}

impl CredentialStore for FileStore {
    fn codes_for(&self, path: &str) -> Option<Vec<String>> {
        self.table.read().get(path).cloned()
    }

    fn add_code(&self, path: &str, code: &str) -> Result<AddOutcome> {
        // Writers serialize on the persist lock, so the snapshot below
        // reflects exactly this mutation and documents land on disk in
        // mutation order.
        let _writer = self.persist.lock();

        // The write lock covers only the membership check and push; that
        // is the whole window a reader can ever wait on, regardless of
        // table size or disk speed.
        {
            let mut table = self.table.write();
            let codes = table.entry(path.to_string()).or_default();
            if codes.iter().any(|c| c == code) {
                return Ok(AddOutcome::AlreadyPresent);
            }
            codes.push(code.to_string());
        }

        // Snapshot under a read lock; concurrent lookups proceed alongside.
        // No other writer can interleave here, it would still be parked on
        // the persist lock.
        let snapshot = self.table.read().clone();

        if let Err(e) = self.write_snapshot(&snapshot) {
            // Unwind the append so memory and disk stay in agreement.
            let mut table = self.table.write();
            if let Some(codes) = table.get_mut(path) {
                codes.retain(|c| c != code);
                if codes.is_empty() {
                    table.remove(path);
                }
            }
            return Err(e);
        }

        debug!(path, "redeem code registered");
        Ok(AddOutcome::Added)
    }
}

/// Write `content` to `path` by writing a temporary file in the same
/// directory, syncing it, and renaming it over the destination.
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    fs::create_dir_all(&parent)
        .map_err(|e| Error::file_system(&parent, "create store directory", e))?;

    let mut tmp = NamedTempFile::new_in(&parent)
        .map_err(|e| Error::file_system(&parent, "create temporary store file", e))?;

    tmp.write_all(content)
        .map_err(|e| Error::file_system(tmp.path().to_path_buf(), "write store file", e))?;

    tmp.as_file()
        .sync_all()
        .map_err(|e| Error::file_system(tmp.path().to_path_buf(), "sync store file", e))?;

    tmp.persist(path)
        .map_err(|e| Error::file_system(path, "replace store file", e.error))?;

    Ok(())
}
