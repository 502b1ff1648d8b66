use std::result::Result as StdResult;

use thiserror::Error;

/// Result type for tagview operations.
pub type Result<T> = StdResult<T, Error>;

/// Tag view error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// An index handed to a mutation call falls outside the collection.
    #[error("index {index} out of range for {len} tags")]
    Index {
        /// The offending index.
        index: usize,
        /// Number of tags the index was checked against.
        len: usize,
    },
    /// The same index appeared twice in one mutation call.
    #[error("duplicate index {0}")]
    DuplicateIndex(usize),
    /// More indices were deleted than the collection holds.
    #[error("cannot delete {count} tags from {len}")]
    Underflow {
        /// Number of indices requested.
        count: usize,
        /// Number of tags held.
        len: usize,
    },
    #[error("render: {0}")]
    /// Rendering failure.
    Render(String),
    #[error("config: {0}")]
    /// Invalid configuration.
    Config(String),
    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}
