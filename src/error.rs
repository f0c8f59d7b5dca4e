//! Error types for batch validation and dispatch preconditions.

use thiserror::Error;

/// Failures raised while reading detection or track batches.
///
/// Errors from the wrapped tracker are never converted into this type; they
/// reach the caller exactly as the tracker produced them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A batch does not have the column count the layout requires.
    #[error("invalid batch shape: expected at least {expected} columns, got {got}")]
    InvalidShape { expected: usize, got: usize },

    /// A detection carries a class id outside `[0, num_classes)`.
    #[error("class id {class_id} out of range for {num_classes} classes")]
    ClassOutOfRange { class_id: usize, num_classes: usize },

    /// The class column holds a value that is not a non-negative integer.
    #[error("class column value {value} is not a valid class id")]
    InvalidClass { value: f32 },

    /// A track row is not exactly eight columns wide.
    #[error("invalid track row: expected 8 columns, got {got}")]
    InvalidTrackRow { got: usize },

    /// An id, class or detection index column of a track row is not a
    /// non-negative integer.
    #[error("track column {column} holds {value}, expected a non-negative integer")]
    InvalidTrackValue { column: usize, value: f32 },
}

pub type Result<T> = std::result::Result<T, Error>;
