//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, invalid profile shapes, clip-window defects, canvas shape
//! mismatches, IO from catalog sinks, and generic errors.
use std::ops::Range;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid profile shape: {0}")]
    InvalidProfile(String),

    #[error(
        "clip window mismatch on {axis} axis: canvas {canvas:?} has length {}, tile {tile:?} has length {}",
        .canvas.len(),
        .tile.len()
    )]
    ClipMismatch {
        axis: char,
        canvas: Range<usize>,
        tile: Range<usize>,
    },

    #[error("canvas shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize, usize),
        found: (usize, usize, usize),
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
