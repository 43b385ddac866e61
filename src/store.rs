//! The in-memory note collection and its synchronization with storage.
//!
//! The store owns the ordered collection, the draft form behind the add
//! action, and at most one note open for editing. Every mutating operation
//! mirrors the full collection back to the injected storage backend
//! (write-through), but only after the initial hydration has completed, so a
//! slow or failed load can never overwrite valid stored data.
use chrono::Utc;
use log::{debug, error, info, warn};

use crate::{CategorySet, EditField, Note, NoteDraft, NotesError, Result, StorageBackend};

/// Manages the note collection and mirrors it to persistent storage.
pub struct NoteStore {
    /// Ordered note collection; insertion order is creation order
    notes: Vec<Note>,

    /// Transient form state for the add action
    draft: NoteDraft,

    /// Working copy of the note currently open for editing
    open_note: Option<Note>,

    /// Initial-load guard; persistence is disarmed until hydration completes
    hydrated: bool,

    /// Injected persistence collaborator
    backend: Box<dyn StorageBackend>,

    /// Category metadata used for presentation
    categories: CategorySet,
}

impl NoteStore {
    /// Creates a store over the given backend. The collection starts empty;
    /// call [`hydrate`](Self::hydrate) before mutating.
    pub fn new(backend: Box<dyn StorageBackend>, categories: CategorySet) -> Self {
        NoteStore {
            notes: Vec::new(),
            draft: NoteDraft::default(),
            open_note: None,
            hydrated: false,
            backend,
            categories,
        }
    }

    /// Loads the persisted collection into memory, backfilling a default
    /// category on records that lack one. Malformed stored data degrades to
    /// an empty collection and is logged, never propagated.
    ///
    /// Runs exactly once; later calls are no-ops. Only after this returns is
    /// write-through persistence armed.
    ///
    /// # Returns
    ///
    /// The number of notes loaded
    pub fn hydrate(&mut self) -> usize {
        if self.hydrated {
            debug!("Store already hydrated, skipping");
            return self.notes.len();
        }

        match self.backend.load() {
            Ok(mut notes) => {
                for note in &mut notes {
                    // Older records may carry an empty category.
                    if note.category.is_empty() {
                        note.category = self.categories.default_style().name.clone();
                    }
                }
                info!("Hydrated store with {} notes", notes.len());
                self.notes = notes;
            }
            Err(e) => {
                error!("Failed to load notes from storage, starting empty: {}", e);
                self.notes = Vec::new();
            }
        }

        self.hydrated = true;
        self.notes.len()
    }

    /// Mirrors the current collection to storage. Skipped while the initial
    /// load has not completed.
    fn persist(&mut self) -> Result<()> {
        if !self.hydrated {
            debug!("Skipping persist: initial load has not completed");
            return Ok(());
        }
        self.backend.save(&self.notes)
    }

    /// Appends a new note built from the draft form.
    ///
    /// A draft whose content trims to empty is a silent no-op. On success the
    /// draft resets to its defaults and the fresh note's id is returned.
    pub fn add_note(&mut self) -> Result<Option<i64>> {
        if self.draft.content.trim().is_empty() {
            debug!("Ignoring add: draft content is empty");
            return Ok(None);
        }

        let id = self.next_id();
        let title = normalize_title(&self.draft.title);
        // Content is stored as typed; only the emptiness check trims.
        let note = Note::new(id, title, self.draft.content.clone(), self.draft.category.clone());

        info!("Adding note {} in category '{}'", id, note.category);
        self.notes.push(note);
        self.draft = NoteDraft::default();
        self.persist()?;
        Ok(Some(id))
    }

    /// Removes the note with the given id, closing the edit view when it was
    /// the note being edited. Confirmation happens at the presentation layer.
    ///
    /// # Returns
    ///
    /// Whether a note was removed
    pub fn delete_note(&mut self, id: i64) -> Result<bool> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            warn!("Delete requested for unknown note {}", id);
            return Ok(false);
        }

        if self.open_note.as_ref().is_some_and(|note| note.id == id) {
            debug!("Deleted note {} was open for editing, closing edit view", id);
            self.open_note = None;
        }

        info!("Deleted note {}", id);
        self.persist()?;
        Ok(true)
    }

    /// Clones the target note into the edit buffer, leaving the collection
    /// untouched until [`save_edit`](Self::save_edit).
    pub fn open_for_edit(&mut self, id: i64) -> Result<()> {
        match self.notes.iter().find(|note| note.id == id) {
            Some(note) => {
                debug!("Opening note {} for editing", id);
                self.open_note = Some(note.clone());
                Ok(())
            }
            None => Err(NotesError::NoteNotFound { id }),
        }
    }

    /// Mutates one field of the edit buffer. Does nothing when no note is
    /// open for editing.
    pub fn update_edit(&mut self, field: EditField, value: &str) {
        let Some(note) = self.open_note.as_mut() else {
            warn!("Edit update with no note open for editing");
            return;
        };
        match field {
            EditField::Title => note.title = normalize_title(value),
            EditField::Content => note.content = value.to_string(),
            // Any string is accepted here; rendering resolves unknown labels
            // to the default category without rewriting the stored value.
            EditField::Category => note.category = value.to_string(),
        }
    }

    /// Applies the edit buffer back onto the collection, stamping
    /// `updated_at`, and closes the edit view.
    ///
    /// A buffer whose content trims to empty is a silent no-op and stays
    /// open, mirroring the modal it models. A buffer whose note has been
    /// deleted in the meantime is discarded.
    ///
    /// # Returns
    ///
    /// Whether the collection was updated
    pub fn save_edit(&mut self) -> Result<bool> {
        let Some(buffer) = self.open_note.take() else {
            debug!("Save requested with no note open for editing");
            return Ok(false);
        };

        if buffer.content.trim().is_empty() {
            debug!("Ignoring save for note {}: content is empty", buffer.id);
            self.open_note = Some(buffer);
            return Ok(false);
        }

        match self.notes.iter_mut().find(|note| note.id == buffer.id) {
            Some(slot) => {
                let mut updated = buffer;
                // Clamp against created_at so the timestamps stay ordered
                // even under clock adjustment.
                updated.updated_at = Some(Utc::now().max(updated.created_at));
                info!("Saving edits to note {}", updated.id);
                *slot = updated;
                self.persist()?;
                Ok(true)
            }
            None => {
                warn!("Edited note {} no longer exists, discarding buffer", buffer.id);
                Ok(false)
            }
        }
    }

    /// Discards the edit buffer without applying changes.
    pub fn close_edit(&mut self) {
        if let Some(note) = self.open_note.take() {
            debug!("Closed edit view for note {} without saving", note.id);
        }
    }

    pub fn set_draft_title(&mut self, title: &str) {
        self.draft.title = title.to_string();
    }

    pub fn set_draft_content(&mut self, content: &str) {
        self.draft.content = content.to_string();
    }

    pub fn set_draft_category(&mut self, category: &str) {
        self.draft.category = category.to_string();
    }

    /// The current collection, in creation order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The note with the given id, when present
    pub fn get(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// The note currently open for editing, when any
    pub fn open_note(&self) -> Option<&Note> {
        self.open_note.as_ref()
    }

    /// The draft form state
    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    /// Category metadata supplied at construction
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Fresh id for a new note: the current time in milliseconds, forced
    /// strictly above every live id so rapid creation stays unique.
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let max_live = self.notes.iter().map(|note| note.id).max().unwrap_or(0);
        now.max(max_live + 1)
    }
}

/// Trims a title, mapping blank input to None.
fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
