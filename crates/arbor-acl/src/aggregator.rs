//! Role aggregator: a user's verdict combined with the verdicts of their roles.
//!
//! A user-level rule always overrides role-level rules. Without one, roles
//! are examined in the order the identity provider returns them:
//!
//! - a `Deny` from any role ends the search with `Deny`;
//! - any other verdict replaces the running result, so a later role's
//!   `Unset` replaces an earlier role's `Grant`.
//!
//! The result therefore depends on role order. Identity providers must
//! return roles in a stable order.

use arbor_core::{
    ActorKind, Error, IdentityProvider, PermissionStore, ResourceId, Result, RoleId, UserId,
    Verdict,
};

use crate::walker::HierarchyWalker;

/// Resolves user verdicts across the user's roles.
#[derive(Clone, Copy)]
pub struct RoleAggregator<'a> {
    store: &'a dyn PermissionStore,
    identity: &'a dyn IdentityProvider,
    walker: HierarchyWalker<'a>,
    strict_roles: bool,
}

impl<'a> RoleAggregator<'a> {
    /// Creates an aggregator.
    ///
    /// With `strict_roles`, a member role that has no actor node fails with
    /// `NotFound`; otherwise it contributes `Unset`. Direct role checks
    /// through [`RoleAggregator::resolve_role`] always require the node.
    pub fn new(
        store: &'a dyn PermissionStore,
        identity: &'a dyn IdentityProvider,
        walker: HierarchyWalker<'a>,
        strict_roles: bool,
    ) -> Self {
        Self {
            store,
            identity,
            walker,
            strict_roles,
        }
    }

    /// Verdict of `user` on `resource`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user has no actor node, plus any walker or store
    /// error.
    pub async fn resolve_user(&self, user: &UserId, resource: ResourceId) -> Result<Verdict> {
        let actor = self
            .store
            .find_actor(ActorKind::User, user.as_str())
            .await?
            .ok_or_else(|| Error::actor_not_found(ActorKind::User, user.as_str()))?;

        let own = self.walker.resolve(actor, resource).await?;
        if !own.is_unset() {
            log::debug!("User {user} on resource {resource}: {own} (user rule)");
            return Ok(own);
        }

        let roles = self.identity.roles_for_user(user).await?;
        let mut verdict = Verdict::Unset;
        for role in &roles {
            let role_verdict = self.resolve_member_role(role, resource).await?;
            if role_verdict.is_denied() {
                log::debug!("User {user} on resource {resource}: deny (role {role})");
                return Ok(Verdict::Deny);
            }
            verdict = role_verdict;
        }

        log::debug!(
            "User {user} on resource {resource}: {verdict} ({} role(s) examined)",
            roles.len()
        );
        Ok(verdict)
    }

    /// Verdict of `role` on `resource`. Role membership is not consulted.
    ///
    /// # Errors
    ///
    /// `NotFound` if the role has no actor node, plus any walker or store
    /// error.
    pub async fn resolve_role(&self, role: &RoleId, resource: ResourceId) -> Result<Verdict> {
        let actor = self
            .store
            .find_actor(ActorKind::Role, role.as_str())
            .await?
            .ok_or_else(|| Error::actor_not_found(ActorKind::Role, role.as_str()))?;
        self.walker.resolve(actor, resource).await
    }

    async fn resolve_member_role(&self, role: &RoleId, resource: ResourceId) -> Result<Verdict> {
        match self.store.find_actor(ActorKind::Role, role.as_str()).await? {
            Some(actor) => self.walker.resolve(actor, resource).await,
            None if self.strict_roles => Err(Error::actor_not_found(ActorKind::Role, role.as_str())),
            None => {
                log::warn!("Role {role} has no actor node; treating as unset");
                Ok(Verdict::Unset)
            }
        }
    }
}

impl std::fmt::Debug for RoleAggregator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleAggregator")
            .field("walker", &self.walker)
            .field("strict_roles", &self.strict_roles)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
