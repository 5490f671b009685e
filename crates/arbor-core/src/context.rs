//! Explicit request context.
//!
//! The calling layer (router, middleware) builds a [`RequestContext`] per
//! request and hands it to the ACL. It carries the authenticated identity
//! and the routed operation, which the ACL falls back to when a check does
//! not name a user or a resource explicitly.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Descriptor, DescriptorSchema, UserId};

/// The authenticated user of the current request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Identity-system user id.
    pub id: UserId,
    /// Display name or email, if known.
    #[serde(default)]
    pub name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates an authenticated user with no display name.
    pub fn new<U: Into<UserId>>(id: U) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

/// The routed operation of the current request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Routed operation (e.g. the controller).
    pub operation: String,
    /// Sub-operation (e.g. the action).
    pub sub_operation: String,
    /// Positional parameters passed to the operation.
    #[serde(default)]
    pub params: Vec<String>,
}

impl Route {
    /// Creates a route with no parameters.
    pub fn new<O: Into<String>, S: Into<String>>(operation: O, sub_operation: S) -> Self {
        Self {
            operation: operation.into(),
            sub_operation: sub_operation.into(),
            params: Vec::new(),
        }
    }

    /// Adds a positional parameter.
    pub fn with_param<P: Into<String>>(mut self, param: P) -> Self {
        self.params.push(param.into());
        self
    }
}

/// Per-request state the ACL may consult.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user, if any.
    #[serde(default)]
    pub user: Option<AuthenticatedUser>,
    /// The routed operation, if any.
    #[serde(default)]
    pub route: Option<Route>,
}

impl RequestContext {
    /// A context with no user and no route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the authenticated user.
    pub fn with_user(mut self, user: AuthenticatedUser) -> Self {
        self.user = Some(user);
        self
    }

    /// Sets the routed operation.
    pub fn with_route(mut self, route: Route) -> Self {
        self.route = Some(route);
        self
    }

    /// Id of the current authenticated user.
    pub fn current_user_id(&self) -> Option<&UserId> {
        self.user.as_ref().map(|u| &u.id)
    }

    /// Descriptor of the current route.
    ///
    /// The operation and sub-operation fill the first two schema fields.
    /// With `use_param`, the first positional parameter fills the schema's
    /// [`param_field`](DescriptorSchema::param_field); a schema with no field
    /// beyond the route fields ignores it. Returns `Ok(None)` when there is
    /// no route.
    pub fn descriptor(
        &self,
        schema: &DescriptorSchema,
        use_param: bool,
    ) -> Result<Option<Descriptor>> {
        let Some(route) = &self.route else {
            return Ok(None);
        };
        let mut descriptor =
            schema.descriptor([route.operation.as_str(), route.sub_operation.as_str()])?;
        if use_param
            && let Some(field) = schema.param_field()
            && let Some(param) = route.params.first().filter(|p| !p.is_empty())
        {
            descriptor.set(field, param.as_str())?;
        }
        Ok(Some(descriptor))
    }
}
