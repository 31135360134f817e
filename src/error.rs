// src/error.rs
//
// Argument validation errors shared by the core and every hosting layer.

/// The precondition a caller violated.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum InvalidArgument {
    #[error("sample rate must be positive and nonzero, got {0}")]
    SampleRate(f64),
    #[error("number of points (n_points) must be greater than zero, got {0}")]
    PointCount(i64),
    #[error("frequency cannot be negative, got {0}")]
    NegativeFrequency(f64),
    #[error("tags list cannot be empty")]
    EmptyTags,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
}

pub type Result<T> = std::result::Result<T, Error>;
