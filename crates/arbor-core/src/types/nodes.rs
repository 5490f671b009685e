//! Actor nodes, resource nodes, and permission edges.

use serde::{Deserialize, Serialize};

use super::descriptor::Descriptor;
use super::ids::{ActorId, ActorKind, ResourceId};
use super::verdict::Verdict;

/// An identity the ACL reasons about (ARO).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorNode {
    /// Store id.
    pub id: ActorId,
    /// User or role.
    pub kind: ActorKind,
    /// Id in the identity system (user id or role id).
    pub foreign_key: String,
}

/// A node in the protected-resource tree (ACO).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNode {
    /// Store id.
    pub id: ResourceId,
    /// Parent node; `None` for a root.
    pub parent: Option<ResourceId>,
    /// Fields used to locate this node.
    #[serde(default)]
    pub descriptor: Descriptor,
}

impl ResourceNode {
    /// Returns `true` if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A stored fact: `actor` has `verdict` on `resource`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Actor the rule applies to.
    pub actor: ActorId,
    /// Resource the rule is attached to.
    pub resource: ResourceId,
    /// Recorded verdict.
    pub verdict: Verdict,
}

impl Edge {
    /// Creates an edge.
    pub fn new(actor: ActorId, resource: ResourceId, verdict: Verdict) -> Self {
        Self {
            actor,
            resource,
            verdict,
        }
    }
}
