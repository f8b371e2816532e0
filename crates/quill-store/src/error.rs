//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error (write path only)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds entity context                         │
//! │       ▲                                                                 │
//! │       │                                                                 │
//! │  CoreError (billing-domain rejections, wrapped transparently)           │
//! │                                                                         │
//! │  NOTE: corrupt or missing collection files on the READ path are not     │
//! │  errors at all: the collection loads as its default (empty) and the     │
//! │  condition is logged.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use quill_core::{CoreError, ValidationError};
use thiserror::Error;

/// Persistence and orchestration errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in its collection.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique business-key violation (e.g. duplicate item code).
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Login rejected.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Billing-domain rejection from quill-core (insufficient stock, credit
    /// limit, invalid bill request, ...). Transparent: callers match on the
    /// inner variant.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Writing a collection file failed.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a collection for the write path failed.
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Field validation failures route through the core error, so a repository
/// can use `?` on `validate_*` calls directly.
impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
