//! Error types for fault tree construction

use thiserror::Error;

use crate::EventId;

/// Fault tree construction errors
///
/// Each variant is a model-validation failure. Loaders are expected to
/// report the offending identifier (see [`FtaError::event_id`]) and abort
/// the analysis run; nothing here is retried or downgraded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FtaError {
    // Registration errors
    #[error("Tree '{tree}' is locked: cannot add gate '{gate}'")]
    LockedModification { tree: String, gate: EventId },

    #[error("Duplicate gate identifier '{id}' in tree '{tree}'")]
    DuplicateIdentifier { tree: String, id: EventId },

    // Classification errors
    #[error("Uninitialized event '{id}' referenced by gate '{parent}'")]
    UninitializedEvent { id: EventId, parent: EventId },

    #[error("Conflicting definitions of event '{id}' referenced by gate '{parent}'")]
    ConflictingDefinition { id: EventId, parent: EventId },

    #[error("Orphan gates in tree '{tree}': {}", join_ids(.ids))]
    OrphanGates { tree: String, ids: Vec<EventId> },
}

impl FtaError {
    /// The identifier the loader should report for this failure.
    ///
    /// For `OrphanGates` this is the first orphan in identifier order.
    pub fn event_id(&self) -> Option<&EventId> {
        match self {
            FtaError::LockedModification { gate, .. } => Some(gate),
            FtaError::DuplicateIdentifier { id, .. } => Some(id),
            FtaError::UninitializedEvent { id, .. } => Some(id),
            FtaError::ConflictingDefinition { id, .. } => Some(id),
            FtaError::OrphanGates { ids, .. } => ids.first(),
        }
    }
}

fn join_ids(ids: &[EventId]) -> String {
    ids.iter()
        .map(EventId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for fault tree operations
pub type FtaResult<T> = Result<T, FtaError>;
