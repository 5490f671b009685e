//! Core types for ACL resolution.

mod descriptor;
mod ids;
mod nodes;
mod proptests;
mod verdict;

pub use descriptor::{DEFAULT_DESCRIPTOR_FIELDS, Descriptor, DescriptorSchema, Field, ROUTE_FIELDS};
pub use ids::{ActorId, ActorKind, ResourceId, RoleId, UserId};
pub use nodes::{ActorNode, Edge, ResourceNode};
pub use verdict::{DefaultPolicy, Verdict};
