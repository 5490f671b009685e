//! # arbor-storage
//!
//! Storage backends for the Arbor ACL.
//!
//! This crate provides:
//! - [`MemoryStore`]: an in-memory `PermissionStore` and `IdentityProvider`
//! - [`Fixture`]: TOML/JSON documents for populating a store
//!
//! ```rust
//! use arbor_core::{ActorKind, ResourceId};
//! use arbor_storage::{Fixture, MemoryStore};
//!
//! let fixture = Fixture::from_toml_str(r#"
//! roles = ["editor"]
//!
//! [[resources]]
//! id = 1
//! path = "Posts"
//! "#).unwrap();
//!
//! let store = MemoryStore::from_fixture(&fixture).unwrap();
//! assert!(store.actor(ActorKind::Role, "editor").is_some());
//! assert!(store.resource(ResourceId::new(1)).is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod fixture;
pub mod memory;

pub use fixture::{Fixture, MembershipSpec, PermissionSpec, ResourceSpec};
pub use memory::MemoryStore;
