//! Error types for arbor-core.
//!
//! "No rule found" is never an error: it is the [`Verdict::Unset`] verdict.
//! The variants here describe data-integrity problems (missing actors,
//! broken hierarchies) and collaborator failures.
//!
//! [`Verdict::Unset`]: crate::Verdict::Unset

use std::path::{Path, PathBuf};

use crate::types::{ActorKind, ResourceId};

/// Errors that can occur while resolving permissions.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An actor or resource identifier does not exist in the store.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was being looked up ("user", "role", "resource", ...)
        kind: String,
        /// The identifier that was not found
        id: String,
    },

    /// A resource hierarchy walk revisited a node.
    #[error("cyclic resource hierarchy at {resource} (path: {})", format_path(.path))]
    CyclicHierarchy {
        /// The node that was visited twice
        resource: ResourceId,
        /// Nodes visited before the cycle closed, in walk order
        path: Vec<ResourceId>,
    },

    /// A resource hierarchy walk exceeded the configured depth bound.
    #[error("resource hierarchy deeper than {max_depth} levels above {resource}")]
    HierarchyTooDeep {
        /// The resource the walk started from
        resource: ResourceId,
        /// Configured maximum depth
        max_depth: usize,
    },

    /// The permission store could not answer a query.
    #[error("store unavailable: {message}")]
    StoreUnavailable {
        /// Human-readable error message
        message: String,
        /// Underlying store error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed input (descriptor paths, verdict encodings, fixtures).
    #[error("validation error: {message}")]
    Validation {
        /// What went wrong
        message: String,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error on a specific file.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a fixture or configuration document.
    #[error("parse error: {message}")]
    Parse {
        /// Parser message
        message: String,
    },
}

/// Convenience `Result` type alias for Arbor operations.
pub type Result<T> = std::result::Result<T, Error>;

fn format_path(path: &[ResourceId]) -> String {
    path.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl Error {
    /// Returns whether this error may succeed on retry.
    ///
    /// Only collaborator failures are transient. Integrity errors such as a
    /// missing actor or a cyclic hierarchy will fail again until the data
    /// is fixed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::StoreUnavailable { .. } => true,
            Error::Io { .. } => true,
            Error::NotFound { .. } => false,
            Error::CyclicHierarchy { .. } => false,
            Error::HierarchyTooDeep { .. } => false,
            Error::Validation { .. } => false,
            Error::Config { .. } => false,
            Error::Parse { .. } => false,
        }
    }

    /// Returns `true` for the `NotFound` variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Creates a generic not-found error.
    pub fn not_found<K: Into<String>, I: ToString>(kind: K, id: I) -> Self {
        Error::NotFound {
            kind: kind.into(),
            id: id.to_string(),
        }
    }

    /// Creates a not-found error for an actor of the given kind.
    pub fn actor_not_found(kind: ActorKind, foreign_key: &str) -> Self {
        Self::not_found(kind.as_str(), foreign_key)
    }

    /// Creates a not-found error for a resource id.
    pub fn resource_not_found(id: ResourceId) -> Self {
        Self::not_found("resource", id)
    }

    /// Creates a store error with a message.
    pub fn store_unavailable<S: Into<String>>(message: S) -> Self {
        Error::StoreUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a store error with a message and source error.
    pub fn store_unavailable_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::StoreUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
