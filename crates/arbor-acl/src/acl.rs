//! The ACL facade: the single entry point for permission checks.
//!
//! A check names a [`Subject`] (the current user, an explicit user, or a
//! role) and a [`Target`] (the current route, a descriptor, or a concrete
//! resource id). The facade resolves the target to a resource node, then
//! dispatches:
//!
//! - roles go straight to the hierarchy walk, without membership;
//! - users go through the role aggregator.
//!
//! A target that cannot be located yields `Unset` for the whole check. A
//! role subject with no actor node is `NotFound`; `strict_roles` only
//! governs roles reached through a user's membership.

use std::fmt;
use std::sync::Arc;

use arbor_core::{
    AuthenticatedUser, Descriptor, Error, IdentityProvider, PermissionStore, RequestContext,
    ResourceId, Result, RoleId, UserId, Verdict,
};

use crate::aggregator::RoleAggregator;
use crate::config::AclConfig;
use crate::locator::ResourceLocator;
use crate::walker::HierarchyWalker;

// ============================================================================
// Request types
// ============================================================================

/// Who is asking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Subject {
    /// The authenticated user of the request context.
    CurrentUser,
    /// An explicit user.
    User(UserId),
    /// A role; membership is not consulted.
    Role(RoleId),
}

impl Subject {
    /// Returns `true` for role checks.
    pub fn is_role(&self) -> bool {
        matches!(self, Self::Role(_))
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentUser => write!(f, "current user"),
            Self::User(user) => write!(f, "user {user}"),
            Self::Role(role) => write!(f, "role {role}"),
        }
    }
}

impl From<UserId> for Subject {
    fn from(user: UserId) -> Self {
        Self::User(user)
    }
}

impl From<RoleId> for Subject {
    fn from(role: RoleId) -> Self {
        Self::Role(role)
    }
}

impl From<&AuthenticatedUser> for Subject {
    fn from(user: &AuthenticatedUser) -> Self {
        Self::User(user.id.clone())
    }
}

/// What is being accessed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// The routed operation of the request context.
    Current,
    /// A concrete resource node.
    Resource(ResourceId),
    /// A descriptor, resolved with the generalization search.
    Descriptor(Descriptor),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current route"),
            Self::Resource(id) => write!(f, "resource {id}"),
            Self::Descriptor(d) => write!(f, "descriptor {d}"),
        }
    }
}

impl From<ResourceId> for Target {
    fn from(id: ResourceId) -> Self {
        Self::Resource(id)
    }
}

impl From<Descriptor> for Target {
    fn from(descriptor: Descriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

/// A permission check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckRequest {
    /// Who is asking.
    pub subject: Subject,
    /// What is being accessed.
    pub target: Target,
    /// Include the route's first positional parameter when deriving the
    /// descriptor from the request context.
    pub use_param: bool,
}

impl CheckRequest {
    /// Creates a check request.
    pub fn new<S: Into<Subject>, T: Into<Target>>(subject: S, target: T) -> Self {
        Self {
            subject: subject.into(),
            target: target.into(),
            use_param: false,
        }
    }

    /// A check of the current user against the current route.
    pub fn current() -> Self {
        Self {
            subject: Subject::CurrentUser,
            target: Target::Current,
            use_param: false,
        }
    }

    /// Sets `use_param`.
    pub fn with_param(mut self, use_param: bool) -> Self {
        self.use_param = use_param;
        self
    }
}

/// Outcome of a check: the resource node the target resolved to, and the
/// verdict on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    /// `None` when the target could not be located.
    pub resource: Option<ResourceId>,
    /// Resolved verdict; `Unset` when `resource` is `None`.
    pub verdict: Verdict,
}

// ============================================================================
// Acl
// ============================================================================

/// Permission resolver over a store and an identity provider.
///
/// Cheap to clone (Arc internals). Every check is a pure read of the
/// collaborators' current state, so checks may run concurrently.
#[derive(Clone)]
pub struct Acl {
    store: Arc<dyn PermissionStore>,
    identity: Arc<dyn IdentityProvider>,
    config: AclConfig,
}

impl Acl {
    /// Creates an ACL.
    pub fn new(
        store: Arc<dyn PermissionStore>,
        identity: Arc<dyn IdentityProvider>,
        config: AclConfig,
    ) -> Self {
        Self {
            store,
            identity,
            config,
        }
    }

    /// Creates an ACL over a backend that is both store and identity provider.
    pub fn with_backend<B>(backend: Arc<B>, config: AclConfig) -> Self
    where
        B: PermissionStore + IdentityProvider + 'static,
    {
        Self::new(backend.clone(), backend, config)
    }

    /// The active configuration.
    pub fn config(&self) -> &AclConfig {
        &self.config
    }

    /// A hierarchy walker over this ACL's store.
    pub fn walker(&self) -> HierarchyWalker<'_> {
        HierarchyWalker::new(self.store.as_ref(), self.config.max_depth)
    }

    /// A role aggregator over this ACL's collaborators.
    pub fn aggregator(&self) -> RoleAggregator<'_> {
        RoleAggregator::new(
            self.store.as_ref(),
            self.identity.as_ref(),
            self.walker(),
            self.config.strict_roles,
        )
    }

    /// A resource locator over this ACL's store.
    pub fn locator(&self) -> ResourceLocator<'_> {
        ResourceLocator::new(self.store.as_ref(), &self.config.descriptor_fields)
    }

    /// Performs a permission check.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user or role has no actor node, or if the subject
    ///   is the current user and the context has none
    /// - `NotFound`, `CyclicHierarchy` or `HierarchyTooDeep` from the walk
    /// - `Validation` if a descriptor names a field outside the schema
    /// - store errors, unchanged
    ///
    /// A target that cannot be located is not an error: the check is
    /// `Unset`.
    pub async fn check(&self, ctx: &RequestContext, request: &CheckRequest) -> Result<Verdict> {
        Ok(self.decide(ctx, request).await?.verdict)
    }

    /// Performs a permission check and reports the resource node the target
    /// resolved to alongside the verdict. Errors as [`Acl::check`].
    pub async fn decide(&self, ctx: &RequestContext, request: &CheckRequest) -> Result<Decision> {
        let Some(resource) = self
            .resolve_target(ctx, &request.target, request.use_param)
            .await?
        else {
            log::debug!(
                "Check {} on {}: unset (no resource)",
                request.subject,
                request.target
            );
            return Ok(Decision {
                resource: None,
                verdict: Verdict::Unset,
            });
        };

        let verdict = match &request.subject {
            Subject::Role(role) => self.aggregator().resolve_role(role, resource).await?,
            Subject::User(user) => self.aggregator().resolve_user(user, resource).await?,
            Subject::CurrentUser => {
                let user = ctx
                    .current_user_id()
                    .ok_or_else(|| Error::not_found("user", "<current request>"))?;
                self.aggregator().resolve_user(user, resource).await?
            }
        };

        log::debug!(
            "Check {} on {} (resource {resource}): {verdict}",
            request.subject,
            request.target
        );
        Ok(Decision {
            resource: Some(resource),
            verdict,
        })
    }

    /// Checks an explicit user.
    pub async fn check_user<T: Into<Target>>(&self, user: &UserId, target: T) -> Result<Verdict> {
        let request = CheckRequest::new(user.clone(), target);
        self.check(&RequestContext::new(), &request).await
    }

    /// Checks a role.
    pub async fn check_role<T: Into<Target>>(&self, role: &RoleId, target: T) -> Result<Verdict> {
        let request = CheckRequest::new(role.clone(), target);
        self.check(&RequestContext::new(), &request).await
    }

    /// Checks the context's user against the context's route.
    pub async fn check_current(&self, ctx: &RequestContext, use_param: bool) -> Result<Verdict> {
        self.check(ctx, &CheckRequest::current().with_param(use_param))
            .await
    }

    /// Performs a check and applies the configured default policy to `Unset`.
    pub async fn is_allowed(&self, ctx: &RequestContext, request: &CheckRequest) -> Result<bool> {
        let verdict = self.check(ctx, request).await?;
        Ok(verdict.allows(self.config.default_policy))
    }

    async fn resolve_target(
        &self,
        ctx: &RequestContext,
        target: &Target,
        use_param: bool,
    ) -> Result<Option<ResourceId>> {
        match target {
            Target::Resource(id) => Ok(Some(*id)),
            Target::Descriptor(descriptor) => self.locator().locate(descriptor).await,
            Target::Current => match ctx.descriptor(&self.config.descriptor_fields, use_param)? {
                Some(descriptor) => self.locator().locate(&descriptor).await,
                None => Ok(None),
            },
        }
    }
}

impl fmt::Debug for Acl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Acl")
            .field("store", &self.store.name())
            .field("config", &self.config)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
