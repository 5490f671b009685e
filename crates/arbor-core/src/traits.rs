//! Collaborator traits consumed by the ACL core.
//!
//! The core owns none of the data it reasons about. Actor nodes, resource
//! nodes, edges and role memberships are read through these traits, which
//! storage backends implement.
//!
//! # Concurrency
//!
//! Implementations must be safe for concurrent reads (`Send + Sync`); the
//! resolver issues queries from concurrent `check` calls without any
//! serialization of its own.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{ActorId, ActorKind, Descriptor, Edge, ResourceId, RoleId, UserId};

/// Read-only access to actor nodes, resource nodes and permission edges.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Find the actor node for an identity-system id of the given kind.
    async fn find_actor(&self, kind: ActorKind, foreign_key: &str) -> Result<Option<ActorId>>;

    /// Find the edge recorded for `(actor, resource)`.
    ///
    /// When several edges exist for the pair, the first one the backend
    /// returns is authoritative.
    async fn find_edge(&self, actor: ActorId, resource: ResourceId) -> Result<Option<Edge>>;

    /// Parent of a resource node, `None` for a root.
    async fn resource_parent(&self, resource: ResourceId) -> Result<Option<ResourceId>>;

    /// Find the resource whose descriptor exactly matches `descriptor`.
    async fn find_resource(&self, descriptor: &Descriptor) -> Result<Option<ResourceId>>;

    /// Whether a resource node exists.
    async fn resource_exists(&self, resource: ResourceId) -> Result<bool>;

    /// Backend name for diagnostics.
    fn name(&self) -> &str;
}

/// Role membership supplied by the identity system.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Roles of a user, in a stable order.
    ///
    /// Role aggregation is order-sensitive, so repeated calls must return
    /// the same sequence for unchanged data.
    async fn roles_for_user(&self, user: &UserId) -> Result<Vec<RoleId>>;
}

#[async_trait]
impl<T: PermissionStore + ?Sized> PermissionStore for Arc<T> {
    async fn find_actor(&self, kind: ActorKind, foreign_key: &str) -> Result<Option<ActorId>> {
        (**self).find_actor(kind, foreign_key).await
    }

    async fn find_edge(&self, actor: ActorId, resource: ResourceId) -> Result<Option<Edge>> {
        (**self).find_edge(actor, resource).await
    }

    async fn resource_parent(&self, resource: ResourceId) -> Result<Option<ResourceId>> {
        (**self).resource_parent(resource).await
    }

    async fn find_resource(&self, descriptor: &Descriptor) -> Result<Option<ResourceId>> {
        (**self).find_resource(descriptor).await
    }

    async fn resource_exists(&self, resource: ResourceId) -> Result<bool> {
        (**self).resource_exists(resource).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T: IdentityProvider + ?Sized> IdentityProvider for Arc<T> {
    async fn roles_for_user(&self, user: &UserId) -> Result<Vec<RoleId>> {
        (**self).roles_for_user(user).await
    }
}
