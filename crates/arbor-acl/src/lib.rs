//! # arbor-acl
//!
//! Permission resolution for the Arbor ACL.
//!
//! This crate implements the decision core:
//! - [`HierarchyWalker`]: nearest recorded verdict up a resource tree
//! - [`RoleAggregator`]: user verdicts combined across roles, deny first
//! - [`ResourceLocator`]: descriptor lookup with progressive generalization
//! - [`Acl`]: the facade that ties them together
//!
//! Actors, resources, edges and memberships are read through the
//! [`PermissionStore`](arbor_core::PermissionStore) and
//! [`IdentityProvider`](arbor_core::IdentityProvider) traits; nothing here
//! writes to them.
//!
//! ```rust
//! use std::sync::Arc;
//! use arbor_acl::{Acl, AclConfig};
//! use arbor_core::{ResourceId, UserId, Verdict};
//! use arbor_storage::MemoryStore;
//!
//! # tokio_test::block_on(async {
//! let mut store = MemoryStore::new();
//! let posts = ResourceId::new(1);
//! store.add_resource(posts, None);
//! store.add_user("alice");
//! let editor = store.add_role("editor");
//! store.grant(editor, posts);
//! store.add_membership("alice", "editor");
//!
//! let acl = Acl::with_backend(Arc::new(store), AclConfig::default());
//! let verdict = acl.check_user(&UserId::from("alice"), posts).await.unwrap();
//! assert_eq!(verdict, Verdict::Grant);
//! # });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod acl;
pub mod aggregator;
pub mod config;
pub mod locator;
pub mod walker;

pub use acl::{Acl, CheckRequest, Decision, Subject, Target};
pub use aggregator::RoleAggregator;
pub use config::{AclConfig, DEFAULT_MAX_DEPTH};
pub use locator::ResourceLocator;
pub use walker::{HierarchyWalker, Resolution};
