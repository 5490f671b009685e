//! In-memory permission store.
//!
//! `MemoryStore` holds actor nodes, resource nodes, edges and role
//! memberships in plain collections. It is populated up front (in code or
//! from a [`Fixture`](crate::Fixture)) and is read-only once shared, so it
//! needs no locking.
//!
//! Lookups are linear where the ACL semantics depend on order: the first
//! edge inserted for an `(actor, resource)` pair is authoritative, and
//! descriptor matches are tried in resource insertion order.

use std::collections::HashMap;

use arbor_core::{
    ActorId, ActorKind, ActorNode, Descriptor, Edge, IdentityProvider, PermissionStore,
    ResourceId, ResourceNode, Result, RoleId, UserId, Verdict,
};
use async_trait::async_trait;

/// In-memory `PermissionStore` and `IdentityProvider`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    actors: Vec<ActorNode>,
    actor_index: HashMap<(ActorKind, String), ActorId>,
    resources: HashMap<ResourceId, ResourceNode>,
    resource_order: Vec<ResourceId>,
    edges: Vec<Edge>,
    memberships: HashMap<UserId, Vec<RoleId>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Actors
    // ------------------------------------------------------------------------

    /// Adds an actor node, returning the existing id if one is already
    /// registered for `(kind, foreign_key)`.
    pub fn add_actor(&mut self, kind: ActorKind, foreign_key: &str) -> ActorId {
        let key = (kind, foreign_key.to_string());
        if let Some(id) = self.actor_index.get(&key) {
            return *id;
        }
        let id = ActorId::new(self.actors.len() as u64 + 1);
        self.actors.push(ActorNode {
            id,
            kind,
            foreign_key: foreign_key.to_string(),
        });
        self.actor_index.insert(key, id);
        id
    }

    /// Adds a user actor.
    pub fn add_user<U: Into<UserId>>(&mut self, user: U) -> ActorId {
        let user = user.into();
        self.add_actor(ActorKind::User, user.as_str())
    }

    /// Adds a role actor.
    pub fn add_role<R: Into<RoleId>>(&mut self, role: R) -> ActorId {
        let role = role.into();
        self.add_actor(ActorKind::Role, role.as_str())
    }

    /// Id of an actor node, if registered.
    pub fn actor(&self, kind: ActorKind, foreign_key: &str) -> Option<ActorId> {
        self.actor_index
            .get(&(kind, foreign_key.to_string()))
            .copied()
    }

    /// All actor nodes in insertion order.
    pub fn actors(&self) -> &[ActorNode] {
        &self.actors
    }

    // ------------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------------

    /// Adds a resource node with no descriptor.
    pub fn add_resource(&mut self, id: ResourceId, parent: Option<ResourceId>) {
        self.add_resource_with(id, parent, Descriptor::new());
    }

    /// Adds (or replaces) a resource node.
    ///
    /// Parents are not checked: dangling or cyclic parent links are kept so
    /// the resolver can report them.
    pub fn add_resource_with(
        &mut self,
        id: ResourceId,
        parent: Option<ResourceId>,
        descriptor: Descriptor,
    ) {
        let node = ResourceNode {
            id,
            parent,
            descriptor,
        };
        if self.resources.insert(id, node).is_none() {
            self.resource_order.push(id);
        }
    }

    /// A resource node, if present.
    pub fn resource(&self, id: ResourceId) -> Option<&ResourceNode> {
        self.resources.get(&id)
    }

    /// All resource nodes in insertion order.
    pub fn resources(&self) -> impl Iterator<Item = &ResourceNode> {
        self.resource_order
            .iter()
            .filter_map(|id| self.resources.get(id))
    }

    // ------------------------------------------------------------------------
    // Edges and memberships
    // ------------------------------------------------------------------------

    /// Records a verdict for `actor` on `resource`.
    ///
    /// Edges are appended; if the pair already has one, the earlier edge
    /// stays authoritative.
    pub fn set_permission(&mut self, actor: ActorId, resource: ResourceId, verdict: Verdict) {
        self.edges.push(Edge::new(actor, resource, verdict));
    }

    /// Records a `Grant` edge.
    pub fn grant(&mut self, actor: ActorId, resource: ResourceId) {
        self.set_permission(actor, resource, Verdict::Grant);
    }

    /// Records a `Deny` edge.
    pub fn deny(&mut self, actor: ActorId, resource: ResourceId) {
        self.set_permission(actor, resource, Verdict::Deny);
    }

    /// Appends a role to a user's membership list. Duplicates are ignored.
    pub fn add_membership<U: Into<UserId>, R: Into<RoleId>>(&mut self, user: U, role: R) {
        let role = role.into();
        let roles = self.memberships.entry(user.into()).or_default();
        if !roles.contains(&role) {
            roles.push(role);
        }
    }

    /// Number of actor nodes.
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Number of resource nodes.
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[async_trait]
impl PermissionStore for MemoryStore {
    async fn find_actor(&self, kind: ActorKind, foreign_key: &str) -> Result<Option<ActorId>> {
        Ok(self.actor(kind, foreign_key))
    }

    async fn find_edge(&self, actor: ActorId, resource: ResourceId) -> Result<Option<Edge>> {
        Ok(self
            .edges
            .iter()
            .find(|e| e.actor == actor && e.resource == resource)
            .copied())
    }

    async fn resource_parent(&self, resource: ResourceId) -> Result<Option<ResourceId>> {
        Ok(self.resources.get(&resource).and_then(|node| node.parent))
    }

    async fn find_resource(&self, descriptor: &Descriptor) -> Result<Option<ResourceId>> {
        if descriptor.is_empty() {
            return Ok(None);
        }
        Ok(self
            .resources()
            .find(|node| node.descriptor.matches(descriptor))
            .map(|node| node.id))
    }

    async fn resource_exists(&self, resource: ResourceId) -> Result<bool> {
        Ok(self.resources.contains_key(&resource))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[async_trait]
impl IdentityProvider for MemoryStore {
    async fn roles_for_user(&self, user: &UserId) -> Result<Vec<RoleId>> {
        Ok(self.memberships.get(user).cloned().unwrap_or_default())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("actors", &self.actors.len())
            .field("resources", &self.resources.len())
            .field("edges", &self.edges.len())
            .field("memberships", &self.memberships.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
