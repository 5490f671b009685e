//! Declarative fixtures for populating a [`MemoryStore`].
//!
//! A fixture lists users, roles, resource nodes, permission edges and role
//! memberships. It can be written as TOML or JSON:
//!
//! ```toml
//! users = ["alice"]
//! roles = ["editor"]
//!
//! [[resources]]
//! id = 1
//! path = "Posts"
//!
//! [[resources]]
//! id = 2
//! parent = 1
//! descriptor = { controller = "Posts", action = "edit" }
//!
//! [[permissions]]
//! role = "editor"
//! resource = 1
//! verdict = "grant"
//!
//! [[memberships]]
//! user = "alice"
//! roles = ["editor"]
//! ```
//!
//! Loading checks referential integrity of ids (duplicate resources, unknown
//! parents, edges on unknown actors or resources). Parent cycles are kept
//! as written; the resolver reports them.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use arbor_core::{
    ActorKind, Descriptor, DescriptorSchema, Error, ResourceId, Result, RoleId, UserId, Verdict,
};
use serde::{Deserialize, Serialize};

use crate::memory::MemoryStore;

/// Top-level fixture document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Fixture {
    /// Descriptor field names used to interpret `path` entries.
    pub descriptor_fields: DescriptorSchema,
    /// User actor nodes, in id order.
    pub users: Vec<UserId>,
    /// Role actor nodes, in id order after the users.
    pub roles: Vec<RoleId>,
    /// Resource nodes.
    pub resources: Vec<ResourceSpec>,
    /// Permission edges. Earlier entries win for the same pair.
    pub permissions: Vec<PermissionSpec>,
    /// Ordered role memberships per user.
    pub memberships: Vec<MembershipSpec>,
}

/// A resource node entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceSpec {
    /// Node id.
    pub id: ResourceId,
    /// Parent node id; absent for a root.
    #[serde(default)]
    pub parent: Option<ResourceId>,
    /// Slash-separated descriptor, e.g. `Posts/edit`.
    #[serde(default)]
    pub path: Option<String>,
    /// Descriptor as named fields.
    #[serde(default)]
    pub descriptor: BTreeMap<String, String>,
}

/// A permission edge entry. Exactly one of `user` or `role` is set.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionSpec {
    /// User the edge belongs to.
    #[serde(default)]
    pub user: Option<UserId>,
    /// Role the edge belongs to.
    #[serde(default)]
    pub role: Option<RoleId>,
    /// Resource node id.
    pub resource: ResourceId,
    /// Recorded verdict.
    pub verdict: Verdict,
}

/// A user's ordered role list.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MembershipSpec {
    /// The user.
    pub user: UserId,
    /// Roles in evaluation order.
    pub roles: Vec<RoleId>,
}

impl ResourceSpec {
    fn descriptor(&self, schema: &DescriptorSchema) -> Result<Descriptor> {
        match (&self.path, self.descriptor.is_empty()) {
            (Some(_), false) => Err(Error::validation(format!(
                "resource {}: set either 'path' or 'descriptor', not both",
                self.id
            ))),
            (Some(path), true) => schema.parse_path(path),
            (None, _) => {
                let mut descriptor = schema.empty();
                for (name, value) in &self.descriptor {
                    descriptor.set(name, value.as_str()).map_err(|e| {
                        Error::validation(format!("resource {}: {e}", self.id))
                    })?;
                }
                Ok(descriptor)
            }
        }
    }
}

impl Fixture {
    /// Parses a TOML fixture.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::parse(format!("invalid TOML fixture: {e}")))
    }

    /// Parses a JSON fixture.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::parse(format!("invalid JSON fixture: {e}")))
    }

    /// Reads a fixture file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        log::debug!(
            "Loading {} fixture from {}",
            if is_json { "JSON" } else { "TOML" },
            path.display()
        );
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }
}

impl MemoryStore {
    /// Builds a store from a fixture, validating ids.
    pub fn from_fixture(fixture: &Fixture) -> Result<Self> {
        let mut store = MemoryStore::new();

        for user in &fixture.users {
            if store.actor(ActorKind::User, user.as_str()).is_some() {
                return Err(Error::validation(format!("duplicate user '{user}'")));
            }
            store.add_user(user.clone());
        }
        for role in &fixture.roles {
            if store.actor(ActorKind::Role, role.as_str()).is_some() {
                return Err(Error::validation(format!("duplicate role '{role}'")));
            }
            store.add_role(role.clone());
        }

        let mut ids = HashSet::new();
        for spec in &fixture.resources {
            if !ids.insert(spec.id) {
                return Err(Error::validation(format!("duplicate resource {}", spec.id)));
            }
        }
        for spec in &fixture.resources {
            if let Some(parent) = spec.parent
                && !ids.contains(&parent)
            {
                return Err(Error::validation(format!(
                    "resource {} has unknown parent {parent}",
                    spec.id
                )));
            }
            let descriptor = spec.descriptor(&fixture.descriptor_fields)?;
            store.add_resource_with(spec.id, spec.parent, descriptor);
        }

        for (i, spec) in fixture.permissions.iter().enumerate() {
            let (kind, key) = match (&spec.user, &spec.role) {
                (Some(user), None) => (ActorKind::User, user.as_str()),
                (None, Some(role)) => (ActorKind::Role, role.as_str()),
                _ => {
                    return Err(Error::validation(format!(
                        "permission #{}: set exactly one of 'user' or 'role'",
                        i + 1
                    )));
                }
            };
            let actor = store.actor(kind, key).ok_or_else(|| {
                Error::validation(format!("permission #{}: unknown {kind} '{key}'", i + 1))
            })?;
            if !ids.contains(&spec.resource) {
                return Err(Error::validation(format!(
                    "permission #{}: unknown resource {}",
                    i + 1,
                    spec.resource
                )));
            }
            store.set_permission(actor, spec.resource, spec.verdict);
        }

        for membership in &fixture.memberships {
            for role in &membership.roles {
                store.add_membership(membership.user.clone(), role.clone());
            }
        }

        log::debug!(
            "Fixture loaded: {} actors, {} resources, {} edges",
            store.actor_count(),
            store.resource_count(),
            store.edge_count()
        );
        Ok(store)
    }

    /// Reads and loads a fixture file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_fixture(&Fixture::load(path)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
