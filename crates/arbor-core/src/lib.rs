//! Arbor Core: shared types, collaborator traits, and errors.
//!
//! This crate provides the foundational types used across all Arbor crates.
//! It has no internal Arbor dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`types`]: Verdicts, ids, descriptors, nodes and edges
//! - [`traits`]: `PermissionStore` and `IdentityProvider`
//! - [`context`]: Explicit per-request identity and route

#![doc = include_str!("../README.md")]

pub mod context;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key types at crate root for convenience
pub use context::{AuthenticatedUser, RequestContext, Route};
pub use error::{Error, Result};
pub use traits::{IdentityProvider, PermissionStore};
pub use types::{
    ActorId, ActorKind, ActorNode, DefaultPolicy, Descriptor, DescriptorSchema, Edge, Field,
    ResourceId, ResourceNode, RoleId, UserId, Verdict,
};
