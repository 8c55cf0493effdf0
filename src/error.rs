//! Error types for orgsearch.

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OrgSearchError>;

/// Entity kind named by a [`OrgSearchError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Building,
    Activity,
    Organization,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Building => "building",
            Self::Activity => "activity",
            Self::Organization => "organization",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum OrgSearchError {
    /// Single-entity lookup had no match. Never produced by multi-result searches.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: i64 },

    /// The activity taxonomy contains a cycle or breaks the level invariant.
    #[error("malformed activity hierarchy: {0}")]
    MalformedHierarchy(String),

    #[error("invalid geo parameter: {0}")]
    InvalidGeoParameter(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OrgSearchError {
    pub(crate) fn not_found(entity: EntityKind, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Maps to a 404-equivalent at the transport layer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Maps to a 400-equivalent at the transport layer.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidGeoParameter(_) | Self::InvalidInput(_))
    }
}
