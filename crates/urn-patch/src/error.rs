use thiserror::Error;
use urn_model::FormKey;

/// Failure reported by a data source collaborator.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("worldspace {0} is not present in the data source")]
    UnknownWorldspace(FormKey),

    #[error("failed to read cell records: {message}")]
    Read { message: String },

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl SourceError {
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }
}

/// Fatal failure that aborts a patch run.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("cell traversal failed")]
    Cells(#[source] SourceError),

    #[error("failed to resolve the parent worldspace of cell {cell}")]
    Parent {
        cell: FormKey,
        #[source]
        source: SourceError,
    },

    #[error("failed to create an override for cell {cell}")]
    Override {
        cell: FormKey,
        #[source]
        source: SourceError,
    },
}
