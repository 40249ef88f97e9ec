use std::io;

use thiserror::Error;

use crate::label::Id;
use crate::validation::Violation;

/// Enumerates high-level errors returned by this library.
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a value that broke one of its constraints.
    #[error("{} ({})", .0, .0.kind())]
    Violation(#[from] Violation),

    /// Represents a lookup of an ID that is not in the registry.
    #[error("There is no {entity} with ID {id}")]
    NotFound { entity: &'static str, id: Id },

    /// Represents a failure of the underlying store.
    #[error("Storage error")]
    Store {
        #[from]
        source: StoreError,
    },

    /// Represents a failure to serialize a document.
    #[error("Serialization error")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Enumerates errors returned by the store subsystem.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents a failure to read a document.
    #[error("Unable to read {key:?}")]
    Read { key: String, source: io::Error },

    /// Represents a failure to write a document.
    #[error("Unable to write {key:?}")]
    Write { key: String, source: io::Error },

    /// Represents a failure to move a written document into place.
    #[error("Unable to persist {key:?}")]
    Persist {
        key: String,
        source: tempfile::PersistError,
    },

    /// Represents a store that can no longer be used.
    #[error("Store unavailable")]
    Unavailable,
}

/// Enumerates errors in the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Represents a flag that is neither `0` nor `1`.
    #[error("{name} must be 0 or 1, not {value:?}")]
    InvalidFlag { name: &'static str, value: String },

    /// Represents an empty path.
    #[error("{name} must not be empty")]
    EmptyPath { name: &'static str },
}
