//! JSON persistence for the family tree.
//!
//! The document shape is `{"next_id": <int>, "people": [<person>…]}` with
//! dates rendered as `YYYY-MM-DD` strings and edge lists as integer arrays.
//! Missing optional keys default on load.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::domain::{FamilyTree, Person, PersonId};

/// Persistence failures.
///
/// I/O errors pass through unwrapped; they are environment failures, not
/// domain errors. `InvalidDocument` covers structurally broken data.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("error loading file: {0}")]
    InvalidDocument(String),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Serialize, Deserialize)]
struct TreeDocument {
    #[serde(default = "default_next_id")]
    next_id: PersonId,
    #[serde(default)]
    people: Vec<Person>,
}

fn default_next_id() -> PersonId {
    1
}

impl FamilyTree {
    /// Write the whole tree to `path` as pretty-printed JSON.
    #[instrument(level = "debug", skip(self))]
    pub fn save(&self, path: &Path) -> StorageResult<()> {
        let document = TreeDocument {
            next_id: self.next_id(),
            people: self.people().cloned().collect(),
        };
        let json = serde_json::to_string_pretty(&document)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Replace the in-memory tree with the document at `path`.
    ///
    /// A missing file is a normal "no prior data" state and returns
    /// `Ok(false)`. Unparsable content raises a descriptive error and
    /// leaves the current in-memory state untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&mut self, path: &Path) -> StorageResult<bool> {
        if !path.exists() {
            return Ok(false);
        }

        let content = fs::read_to_string(path)?;
        let document: TreeDocument = serde_json::from_str(&content)
            .map_err(|e| StorageError::InvalidDocument(e.to_string()))?;

        *self = FamilyTree::from_parts(document.next_id, document.people);
        Ok(true)
    }
}
