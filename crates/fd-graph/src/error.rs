//! Graph-extraction error types.

use fd_core::{CompId, FdError};

/// Errors surfaced by graph extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An excluded component ID does not exist in the composition.
    UnknownExcluded { comp: CompId },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::UnknownExcluded { comp } => {
                write!(f, "Excluded component {} does not exist", comp)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for FdError {
    fn from(err: GraphError) -> Self {
        FdError::Invariant {
            what: Box::leak(err.to_string().into_boxed_str()),
        }
    }
}
