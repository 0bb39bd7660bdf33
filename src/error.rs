//! Unified error handling for the hostel-rooms crate
//!
//! Every fallible library operation returns [`Result`], whose error type
//! [`Error`] carries enough structure for the HTTP layer to pick a status
//! code and for the CLI to print a useful message.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hostel_rooms::error::{Error, ErrorCategory};
//!
//! fn report(err: &Error) {
//!     match err.category() {
//!         ErrorCategory::Conflict => println!("{err}"),
//!         _ => eprintln!("Fatal error: {err}"),
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The request collides with existing state (duplicate room number)
    Conflict,
    /// The request itself is malformed
    Validation,
    /// Storage and I/O errors
    Storage,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conflict => "conflict",
            Self::Validation => "validation",
            Self::Storage => "storage",
            Self::Other => "other",
        }
    }
}

/// Unified error type for the hostel-rooms crate
#[derive(Error, Debug)]
pub enum Error {
    /// A room with this number is already stored
    #[error("Room {room_no} already added")]
    DuplicateRoom { room_no: String },

    /// Input failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a duplicate-room error
    pub fn duplicate_room(room_no: impl Into<String>) -> Self {
        Self::DuplicateRoom {
            room_no: room_no.into(),
        }
    }

    /// Create a validation error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateRoom { .. } => ErrorCategory::Conflict,
            Self::InvalidInput(_) => ErrorCategory::Validation,
            Self::Database(_) | Self::Io(_) => ErrorCategory::Storage,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }

    /// Check if retrying the same request could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::DuplicateRoom { .. } | Self::InvalidInput(_) => false,
            Self::Database(e) => matches!(
                e.sqlite_error_code(),
                Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
            ),
            Self::Io(_) => true,
            Self::Other { .. } => false,
        }
    }
}

// Conversion from rusqlite::Error
impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err)
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
