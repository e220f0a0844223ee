//! Composition-specific error types.

use fd_core::{AdapterId, CompId, FdError, InputId};

/// Composition construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A component has no slot with the given name on the requested side.
    UnknownSlot {
        comp: CompId,
        name: String,
        side: &'static str,
    },

    /// A component ID is out of range.
    UnknownComponent { comp: CompId },

    /// An adapter ID is out of range.
    UnknownAdapter { adapter: AdapterId },

    /// An input slot already has an upstream source.
    InputAlreadyWired { input: InputId },

    /// An adapter already has an upstream source.
    AdapterAlreadyWired { adapter: AdapterId },

    /// A wire's two ends disagree (target does not claim its source back).
    InconsistentWiring { what: &'static str },

    /// Two slots on the same side of a component share a name.
    DuplicateSlotName { comp: CompId, name: String },
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::UnknownSlot { comp, name, side } => {
                write!(f, "Component {} has no {} slot named '{}'", comp, side, name)
            }
            ModelError::UnknownComponent { comp } => {
                write!(f, "Component {} does not exist", comp)
            }
            ModelError::UnknownAdapter { adapter } => {
                write!(f, "Adapter {} does not exist", adapter)
            }
            ModelError::InputAlreadyWired { input } => {
                write!(f, "Input slot {} already has a source", input)
            }
            ModelError::AdapterAlreadyWired { adapter } => {
                write!(f, "Adapter {} already has a source", adapter)
            }
            ModelError::InconsistentWiring { what } => {
                write!(f, "Inconsistent wiring: {}", what)
            }
            ModelError::DuplicateSlotName { comp, name } => {
                write!(f, "Component {} declares slot name '{}' twice", comp, name)
            }
        }
    }
}

impl std::error::Error for ModelError {}

impl From<ModelError> for FdError {
    fn from(err: ModelError) -> Self {
        FdError::Invariant {
            what: Box::leak(err.to_string().into_boxed_str()),
        }
    }
}
