//! Persistence for the note collection.
//!
//! The whole collection lives in a single named storage slot: one JSON file
//! holding the serialized array of notes. Every mutation rewrites the slot in
//! full (write-through); there is no batching and no concurrent writer.
use std::{
    cell::RefCell,
    fs,
    io::Write,
    path::{Path, PathBuf},
    rc::Rc,
};

use log::{debug, error, info, trace};
use tempfile::NamedTempFile;

use crate::{Note, NotesError, Result};

/// Fixed identifier of the storage slot; the file backend derives its file
/// name from it.
pub const STORAGE_KEY: &str = "quick-notes";

/// Storage collaborator injected into the note store.
///
/// `load` reads the full persisted collection, `save` overwrites it. The file
/// backend is the production implementation; [`MemoryStorage`] substitutes
/// for it in tests.
pub trait StorageBackend {
    /// Reads the persisted collection. An absent slot yields an empty
    /// collection; malformed contents are an error for the caller to absorb.
    fn load(&self) -> Result<Vec<Note>>;

    /// Serializes the full collection and overwrites the slot.
    fn save(&self, notes: &[Note]) -> Result<()>;
}

/// File-backed storage slot under the application data directory.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates the backend, ensuring the data directory exists.
    pub fn new(data_dir: &Path) -> Result<Self> {
        if !data_dir.exists() {
            debug!("Data directory does not exist, creating: {}", data_dir.display());
            fs::create_dir_all(data_dir).map_err(|e| {
                error!("Failed to create data directory: {}", e);
                NotesError::DirectoryError {
                    path: data_dir.to_path_buf(),
                }
            })?;
        }

        Ok(FileStorage {
            path: data_dir.join(format!("{}.json", STORAGE_KEY)),
        })
    }

    /// Path of the storage slot file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileStorage {
    fn load(&self) -> Result<Vec<Note>> {
        if !self.path.exists() {
            debug!("Storage slot {} does not exist yet", self.path.display());
            return Ok(Vec::new());
        }

        let text = fs::read_to_string(&self.path).map_err(|e| {
            error!("Failed to read storage slot {}: {}", self.path.display(), e);
            NotesError::Io(e)
        })?;

        let notes: Vec<Note> = serde_json::from_str(&text)?;
        info!("Loaded {} notes from {}", notes.len(), self.path.display());
        Ok(notes)
    }

    /// Overwrites the slot using atomic operations to prevent data corruption
    fn save(&self, notes: &[Note]) -> Result<()> {
        debug!("Persisting {} notes to {}", notes.len(), self.path.display());

        // Create a temporary file in the same directory (for atomic operation)
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            NotesError::Io(e)
        })?;

        trace!("Serializing note collection to JSON");
        let json = serde_json::to_string_pretty(notes).map_err(|e| {
            error!("Failed to serialize note collection: {}", e);
            NotesError::Serialization(e)
        })?;

        temp_file.write_all(json.as_bytes()).map_err(|e| {
            error!("Failed to write to temporary file: {}", e);
            NotesError::Io(e)
        })?;

        temp_file.flush().map_err(|e| {
            error!("Failed to flush temporary file: {}", e);
            NotesError::Io(e)
        })?;

        // Atomically move the temporary file over the slot
        temp_file.persist(&self.path).map_err(|e| {
            error!("Failed to persist file {}: {}", self.path.display(), e.error);
            NotesError::Io(e.error)
        })?;

        trace!("Storage slot updated");
        Ok(())
    }
}

/// In-memory storage backend, a stand-in for the file slot in tests.
///
/// Clones share the same underlying slot, so a test can keep a handle to the
/// backend after handing one to the store.
#[derive(Default, Clone)]
pub struct MemoryStorage {
    inner: Rc<RefCell<MemorySlot>>,
}

#[derive(Default)]
struct MemorySlot {
    notes: Vec<Note>,
    saves: usize,
}

impl MemoryStorage {
    /// Backend pre-seeded with a collection
    pub fn with_notes(notes: Vec<Note>) -> Self {
        MemoryStorage {
            inner: Rc::new(RefCell::new(MemorySlot { notes, saves: 0 })),
        }
    }

    /// Snapshot of the persisted collection
    pub fn snapshot(&self) -> Vec<Note> {
        self.inner.borrow().notes.clone()
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Vec<Note>> {
        Ok(self.inner.borrow().notes.clone())
    }

    fn save(&self, notes: &[Note]) -> Result<()> {
        let mut slot = self.inner.borrow_mut();
        slot.notes = notes.to_vec();
        slot.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::Note;

    use super::{FileStorage, StorageBackend, STORAGE_KEY};

    fn sample_notes() -> Vec<Note> {
        vec![
            Note::new(1, Some("First".to_string()), "alpha".to_string(), "Work".to_string()),
            Note::new(2, None, "  beta  ".to_string(), "Foo".to_string()),
        ]
    }

    #[test]
    fn missing_slot_loads_as_empty_collection() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path()).expect("backend");
        assert!(storage.load().expect("load").is_empty());
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path()).expect("backend");

        let notes = sample_notes();
        storage.save(&notes).expect("save");
        let loaded = storage.load().expect("load");
        assert_eq!(loaded, notes);
    }

    #[test]
    fn save_overwrites_the_previous_contents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path()).expect("backend");

        storage.save(&sample_notes()).expect("first save");
        storage.save(&[]).expect("second save");
        assert!(storage.load().expect("load").is_empty());
    }

    #[test]
    fn malformed_slot_contents_surface_as_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path()).expect("backend");
        fs::write(dir.path().join(format!("{}.json", STORAGE_KEY)), "not json").expect("write");

        assert!(storage.load().is_err());
    }

    #[test]
    fn slot_file_is_named_after_the_storage_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path()).expect("backend");
        assert!(storage.path().ends_with("quick-notes.json"));
    }
}
