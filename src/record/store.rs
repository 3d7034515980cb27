//! The record store and its persistence seam.
//!
//! Records persist as a single JSON document (an array of record objects) in
//! one storage slot. The slot is a trait so the store can be exercised in
//! tests without touching the filesystem.

use std::{fs, io, path::PathBuf};

use crate::{
    Error,
    record::{Record, RecordDraft, RecordId},
};

// ============================================================================
// STORAGE SLOTS
// ============================================================================

/// A single read/write slot holding the serialized record document.
pub trait StorageSlot: Send {
    /// Read the persisted document. `None` when nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, Error>;

    /// Replace the persisted document. No partial-write semantics; the last
    /// write wins.
    fn write(&mut self, document: &str) -> Result<(), Error>;
}

/// A [StorageSlot] backed by a single JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Create a slot that reads and writes the file at `path`.
    ///
    /// The file does not need to exist yet; it is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, Error> {
        match fs::read_to_string(&self.path) {
            Ok(document) => Ok(Some(document)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(Error::StorageError(error.to_string())),
        }
    }

    fn write(&mut self, document: &str) -> Result<(), Error> {
        fs::write(&self.path, document).map_err(|error| Error::StorageError(error.to_string()))
    }
}

/// A [StorageSlot] that keeps the document in memory. Used in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    document: Option<String>,
}

impl MemorySlot {
    /// Create a slot pre-populated with `document`.
    pub fn with_document(document: &str) -> Self {
        Self {
            document: Some(document.to_owned()),
        }
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, Error> {
        Ok(self.document.clone())
    }

    fn write(&mut self, document: &str) -> Result<(), Error> {
        self.document = Some(document.to_owned());
        Ok(())
    }
}

// ============================================================================
// RECORD STORE
// ============================================================================

/// Owns the in-memory collection of records and mirrors it to a storage slot.
///
/// Records are kept in insertion order; views re-sort as needed. Every
/// mutation writes the full document back to the slot before returning.
pub struct RecordStore {
    records: Vec<Record>,
    slot: Box<dyn StorageSlot>,
}

impl RecordStore {
    /// Load the store from `slot`.
    ///
    /// A missing, unreadable or unparseable document initializes an empty
    /// collection so that a corrupt data file never prevents the app from
    /// starting. The recovery is logged at warn level.
    pub fn load(slot: impl StorageSlot + 'static) -> Self {
        let records = match slot.read() {
            Ok(Some(document)) => match serde_json::from_str::<Vec<Record>>(&document) {
                Ok(records) => records,
                Err(error) => {
                    tracing::warn!(
                        "could not parse the persisted record document, starting empty: {error}"
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(
                    "could not read the persisted record document, starting empty: {error}"
                );
                Vec::new()
            }
        };

        Self {
            records,
            slot: Box::new(slot),
        }
    }

    /// The records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Validate `draft`, attach a fresh unique ID, append the record and
    /// persist the store.
    ///
    /// # Errors
    /// This function will return a:
    /// - validation error from [RecordDraft::finalize] (the store is unchanged),
    /// - or [Error::StorageError] if the document could not be written.
    pub fn add(&mut self, draft: RecordDraft) -> Result<Record, Error> {
        let record = draft.finalize(RecordId::generate())?;

        self.records.push(record.clone());
        self.save()?;

        Ok(record)
    }

    /// Remove the record with `id` if present and persist the store.
    ///
    /// Removing an unknown ID is a no-op. Returns whether a record was
    /// removed.
    ///
    /// # Errors
    /// This function will return an [Error::StorageError] if the document
    /// could not be written.
    pub fn delete(&mut self, id: &RecordId) -> Result<bool, Error> {
        let count_before = self.records.len();
        self.records.retain(|record| &record.id != id);
        let removed = self.records.len() != count_before;

        if removed {
            self.save()?;
        }

        Ok(removed)
    }

    /// Remove every record and persist the empty store.
    ///
    /// # Errors
    /// This function will return an [Error::StorageError] if the document
    /// could not be written.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.records.clear();
        self.save()
    }

    /// Destructively replace the whole collection with `records` and persist.
    ///
    /// Used by import; this is a replace, not a merge. Returns the new record
    /// count.
    ///
    /// # Errors
    /// This function will return an [Error::StorageError] if the document
    /// could not be written.
    pub fn replace_all(&mut self, records: Vec<Record>) -> Result<usize, Error> {
        self.records = records;
        self.save()?;

        Ok(self.records.len())
    }

    /// Serialize the full collection, with no filtering applied.
    ///
    /// The result has the same shape as the persisted document, so an export
    /// can be imported back.
    pub fn export_document(&self) -> Result<String, Error> {
        serde_json::to_string(&self.records)
            .map_err(|error| Error::JsonSerializationError(error.to_string()))
    }

    fn save(&mut self) -> Result<(), Error> {
        let document = serde_json::to_string(&self.records)
            .map_err(|error| Error::JsonSerializationError(error.to_string()))?;

        self.slot.write(&document)
    }
}

// ============================================================================
// TESTS
// ============================================================================
