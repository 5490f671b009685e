//! Hierarchy walker: nearest recorded verdict on a resource's ancestor path.
//!
//! Starting at a resource node, the walker looks for an edge for the actor
//! on that node, then on its parent, and so on up to the root. The first
//! edge found wins, whatever its value. No edge anywhere on the path
//! resolves to [`Verdict::Unset`].
//!
//! The resource tree is owned by the store, so the walk is an explicit loop
//! over resource ids. A visited set turns a cyclic hierarchy into
//! [`Error::CyclicHierarchy`], and `max_depth` bounds the number of nodes a
//! single walk may visit.

use std::collections::HashSet;

use arbor_core::{ActorId, Error, PermissionStore, ResourceId, Result, Verdict};

/// Outcome of a hierarchy walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The verdict found.
    pub verdict: Verdict,
    /// Node whose edge produced the verdict; `None` if the root was reached.
    pub source: Option<ResourceId>,
    /// Number of nodes visited.
    pub visited: usize,
}

/// Walks a resource hierarchy upward for one actor.
#[derive(Clone, Copy)]
pub struct HierarchyWalker<'a> {
    store: &'a dyn PermissionStore,
    max_depth: usize,
}

impl<'a> HierarchyWalker<'a> {
    /// Creates a walker over `store`.
    pub fn new(store: &'a dyn PermissionStore, max_depth: usize) -> Self {
        Self { store, max_depth }
    }

    /// Verdict of `actor` on `resource`, inherited from the nearest ancestor
    /// (inclusive) that has an edge for the actor.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the start node, or a parent it links to, does not exist
    /// - `CyclicHierarchy` if the walk revisits a node
    /// - `HierarchyTooDeep` if more than `max_depth` nodes are visited
    /// - store errors, unchanged
    pub async fn resolve(&self, actor: ActorId, resource: ResourceId) -> Result<Verdict> {
        Ok(self.walk(actor, resource).await?.verdict)
    }

    /// Like [`resolve`](Self::resolve), also reporting where the verdict
    /// came from.
    pub async fn walk(&self, actor: ActorId, resource: ResourceId) -> Result<Resolution> {
        if !self.store.resource_exists(resource).await? {
            return Err(Error::resource_not_found(resource));
        }

        let mut visited: HashSet<ResourceId> = HashSet::new();
        let mut path: Vec<ResourceId> = Vec::new();
        let mut current = resource;

        loop {
            if !visited.insert(current) {
                log::error!(
                    "Cyclic resource hierarchy: node {current} revisited while walking from {resource}"
                );
                return Err(Error::CyclicHierarchy {
                    resource: current,
                    path,
                });
            }
            if path.len() >= self.max_depth {
                return Err(Error::HierarchyTooDeep {
                    resource,
                    max_depth: self.max_depth,
                });
            }
            path.push(current);

            log::trace!("Walker: actor {actor} at resource {current}");
            if let Some(edge) = self.store.find_edge(actor, current).await? {
                log::debug!(
                    "Actor {actor} on resource {resource}: {} (from resource {current})",
                    edge.verdict
                );
                return Ok(Resolution {
                    verdict: edge.verdict,
                    source: Some(current),
                    visited: path.len(),
                });
            }

            let Some(parent) = self.store.resource_parent(current).await? else {
                // Reached through a parent link: a root, or a dangling reference.
                if current != resource && !self.store.resource_exists(current).await? {
                    return Err(Error::resource_not_found(current));
                }
                log::debug!("Actor {actor} on resource {resource}: unset (root reached)");
                return Ok(Resolution {
                    verdict: Verdict::Unset,
                    source: None,
                    visited: path.len(),
                });
            };
            current = parent;
        }
    }
}

impl std::fmt::Debug for HierarchyWalker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HierarchyWalker")
            .field("store", &self.store.name())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
