//! File-backed record store for charstore.
//!
//! Every operation reads the whole data file through the codec, works on the
//! in-memory set, and (for mutations) writes the whole set back. Nothing is
//! cached between calls, and there is no locking: two processes mutating the
//! same file race and the last writer wins.

pub mod atomic;

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info};

use crate::codec;
use crate::error::{Error, Result};
use crate::record::{Character, CharacterChanges, NewCharacter};

/// CRUD access to one CSV data file.
#[derive(Debug, Clone)]
pub struct Store {
    /// Path to the data file.
    path: PathBuf,
}

impl Store {
    /// Bind a store to the data file at `path`.
    ///
    /// Nothing is touched on disk until an operation runs.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the data file with only a header.
    ///
    /// Creates parent directories as needed. An existing file is left alone
    /// unless `force` is set. Returns `true` if a file was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the file cannot be created.
    pub fn init(&self, force: bool) -> Result<bool> {
        if self.path.exists() && !force {
            debug!("Data file already exists at {}", self.path.display());
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        self.save(&[])?;
        info!("Initialized data file at {}", self.path.display());
        Ok(true)
    }

    /// Load every record in file order.
    ///
    /// Malformed lines are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileRead`] if the file cannot be opened or read.
    pub fn find_all(&self) -> Result<Vec<Character>> {
        let to_read_error = |source: std::io::Error| Error::FileRead {
            path: self.path.clone(),
            source,
        };

        let file = File::open(&self.path).map_err(to_read_error)?;
        codec::read_all(file).map_err(|err| match err {
            Error::Io(source) => to_read_error(source),
            other => other,
        })
    }

    /// Find a record by id. A missing id is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be read.
    pub fn find_by_id(&self, id: u32) -> Result<Option<Character>> {
        Ok(self.find_all()?.into_iter().find(|c| c.id == id))
    }

    /// Append a new record and return it.
    ///
    /// The id is one more than the highest id in the file (1 for an empty
    /// file) and `created` is the current UTC time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a field contains a line break, and
    /// an error if the file cannot be read or written or if the highest id is
    /// already `u32::MAX`.
    pub fn create(&self, new: NewCharacter) -> Result<Character> {
        self.create_at(new, Utc::now())
    }

    fn create_at(&self, new: NewCharacter, now: DateTime<Utc>) -> Result<Character> {
        new.validate()?;
        let mut records = self.find_all()?;
        let id = next_id(&records)?;

        let character = Character::from_new(id, new, format_created(now));
        records.push(character.clone());
        self.save(&records)?;

        info!(
            id = character.id,
            name = %character.name,
            gender = %character.gender,
            "Created character"
        );
        Ok(character)
    }

    /// Apply `changes` to the record with the given id.
    ///
    /// Returns the updated record, or `Ok(None)` without touching the file if
    /// no record has that id. Only fields present in `changes` are modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a supplied value contains a line
    /// break, and an error if the file cannot be read or written.
    pub fn update(&self, id: u32, changes: CharacterChanges) -> Result<Option<Character>> {
        changes.validate()?;
        let mut records = self.find_all()?;
        let Some(character) = records.iter_mut().find(|c| c.id == id) else {
            debug!(id, "Update skipped, character not found");
            return Ok(None);
        };

        character.apply(changes);
        let updated = character.clone();
        self.save(&records)?;

        info!(
            id = updated.id,
            name = %updated.name,
            gender = %updated.gender,
            "Updated character"
        );
        Ok(Some(updated))
    }

    /// Remove the record with the given id.
    ///
    /// Returns `true` if a record was removed. When nothing matches the file
    /// is not rewritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub fn delete(&self, id: u32) -> Result<bool> {
        let mut records = self.find_all()?;
        let before = records.len();
        records.retain(|c| c.id != id);

        if records.len() == before {
            debug!(id, "Delete skipped, character not found");
            return Ok(false);
        }

        self.save(&records)?;
        info!(id, "Deleted character");
        Ok(true)
    }

    /// Replace the data file with `records`.
    fn save(&self, records: &[Character]) -> Result<()> {
        atomic::replace(&self.path, |writer| {
            codec::write_all(writer, records).map_err(|err| match err {
                Error::Io(source) => Error::FileWrite {
                    path: self.path.clone(),
                    source,
                },
                other => other,
            })
        })?;
        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// Next free id: one past the highest, or 1 when there are no records.
fn next_id(records: &[Character]) -> Result<u32> {
    let max = records.iter().map(|c| c.id).max().unwrap_or(0);
    max.checked_add(1).ok_or(Error::IdExhausted { max })
}

/// Render a creation timestamp, e.g. `2017-11-04T18:48:46.250Z`.
#[must_use]
pub fn format_created(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
