use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use crate::layers::layer::LayerKind;

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, NnError>;

/// Every failure the engine and its collaborators can report.
#[derive(Debug)]
pub enum NnError {
    /// A layer was sized with zero nodes.
    InvalidLayerSize { kind: LayerKind, size: usize },
    /// A precondition on an argument was violated.
    InvalidArgument(String),
    /// A vector did not match the layer it was meant for.
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// The network has no layers to run.
    NotInitialized,
    Io(io::Error),
    /// The external normalizer failed or produced unusable output.
    Normalization(String),
}

impl Display for NnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NnError::InvalidLayerSize { kind, size } => {
                write!(f, "{kind} layer must have at least one node, got {size}")
            }
            NnError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            NnError::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "{what} has length {got}, expected {expected}"),
            NnError::NotInitialized => {
                write!(f, "network not initialized: input and output layers are missing")
            }
            NnError::Io(e) => write!(f, "io error: {e}"),
            NnError::Normalization(msg) => write!(f, "normalization failed: {msg}"),
        }
    }
}

impl Error for NnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NnError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for NnError {
    fn from(e: io::Error) -> Self {
        NnError::Io(e)
    }
}
