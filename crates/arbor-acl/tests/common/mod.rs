//! Common test utilities and harness for Arbor ACL integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use arbor_acl::{Acl, AclConfig};
use arbor_core::{
    ActorId, ActorKind, Descriptor, Edge, Error, IdentityProvider, PermissionStore, ResourceId,
    Result, RoleId, UserId,
};
use arbor_storage::MemoryStore;
use async_trait::async_trait;

pub const SITE: ResourceId = ResourceId::new(1);
pub const POSTS: ResourceId = ResourceId::new(2);
pub const POSTS_EDIT: ResourceId = ResourceId::new(3);
pub const COMMENTS: ResourceId = ResourceId::new(4);

/// Test harness wrapping a populated store.
///
/// The default tree is:
///
/// ```text
/// 1 site {controller=Site}
/// ├── 2 posts {controller=Posts}
/// │   └── 3 posts/edit {controller=Posts, action=edit}
/// └── 4 comments {controller=Comments}
/// ```
pub struct TestHarness {
    /// Store under test; mutate before calling [`TestHarness::acl`].
    pub store: MemoryStore,
    /// ACL configuration.
    pub config: AclConfig,
}

impl TestHarness {
    /// Creates a harness with the default resource tree and no actors.
    pub fn new() -> Self {
        let mut store = MemoryStore::new();
        store.add_resource_with(SITE, None, Descriptor::from_pairs([("controller", "Site")]));
        store.add_resource_with(
            POSTS,
            Some(SITE),
            Descriptor::from_pairs([("controller", "Posts")]),
        );
        store.add_resource_with(
            POSTS_EDIT,
            Some(POSTS),
            Descriptor::from_pairs([("controller", "Posts"), ("action", "edit")]),
        );
        store.add_resource_with(
            COMMENTS,
            Some(SITE),
            Descriptor::from_pairs([("controller", "Comments")]),
        );
        Self {
            store,
            config: AclConfig::default(),
        }
    }

    /// Adds a user with the given roles, creating role actors as needed.
    pub fn user_with_roles(&mut self, user: &str, roles: &[&str]) -> ActorId {
        let id = self.store.add_user(user);
        for role in roles {
            self.store.add_role(*role);
            self.store.add_membership(user, *role);
        }
        id
    }

    /// Builds the ACL over a snapshot of the store.
    pub fn acl(&self) -> Acl {
        Acl::with_backend(Arc::new(self.store.clone()), self.config.clone())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn user(id: &str) -> UserId {
    UserId::from(id)
}

pub fn role(id: &str) -> RoleId {
    RoleId::from(id)
}

// ============================================================================
// Failing store
// ============================================================================

/// Store whose every read fails with `StoreUnavailable`.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl PermissionStore for FailingStore {
    async fn find_actor(&self, _kind: ActorKind, _foreign_key: &str) -> Result<Option<ActorId>> {
        Err(Error::store_unavailable("connection refused"))
    }

    async fn find_edge(&self, _actor: ActorId, _resource: ResourceId) -> Result<Option<Edge>> {
        Err(Error::store_unavailable("connection refused"))
    }

    async fn resource_parent(&self, _resource: ResourceId) -> Result<Option<ResourceId>> {
        Err(Error::store_unavailable("connection refused"))
    }

    async fn find_resource(&self, _descriptor: &Descriptor) -> Result<Option<ResourceId>> {
        Err(Error::store_unavailable("connection refused"))
    }

    async fn resource_exists(&self, _resource: ResourceId) -> Result<bool> {
        Err(Error::store_unavailable("connection refused"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

#[async_trait]
impl IdentityProvider for FailingStore {
    async fn roles_for_user(&self, _user: &UserId) -> Result<Vec<RoleId>> {
        Err(Error::store_unavailable("connection refused"))
    }
}

// ============================================================================
// Counting store
// ============================================================================

/// Wraps a `MemoryStore` and counts edge lookups and existence checks.
#[derive(Debug)]
pub struct CountingStore {
    inner: MemoryStore,
    edge_lookups: AtomicUsize,
    exists_lookups: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            edge_lookups: AtomicUsize::new(0),
            exists_lookups: AtomicUsize::new(0),
        }
    }

    pub fn edge_lookups(&self) -> usize {
        self.edge_lookups.load(Ordering::SeqCst)
    }

    pub fn exists_lookups(&self) -> usize {
        self.exists_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionStore for CountingStore {
    async fn find_actor(&self, kind: ActorKind, foreign_key: &str) -> Result<Option<ActorId>> {
        self.inner.find_actor(kind, foreign_key).await
    }

    async fn find_edge(&self, actor: ActorId, resource: ResourceId) -> Result<Option<Edge>> {
        self.edge_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_edge(actor, resource).await
    }

    async fn resource_parent(&self, resource: ResourceId) -> Result<Option<ResourceId>> {
        self.inner.resource_parent(resource).await
    }

    async fn find_resource(&self, descriptor: &Descriptor) -> Result<Option<ResourceId>> {
        self.inner.find_resource(descriptor).await
    }

    async fn resource_exists(&self, resource: ResourceId) -> Result<bool> {
        self.exists_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.resource_exists(resource).await
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[async_trait]
impl IdentityProvider for CountingStore {
    async fn roles_for_user(&self, user: &UserId) -> Result<Vec<RoleId>> {
        self.inner.roles_for_user(user).await
    }
}
