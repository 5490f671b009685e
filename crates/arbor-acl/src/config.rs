//! Resolver configuration.
//!
//! ```toml
//! max_depth = 64
//! descriptor_fields = ["controller", "action", "param"]
//! strict_roles = false
//! default_policy = "deny"
//! ```

use arbor_core::{DefaultPolicy, DescriptorSchema, Error, Result};
use serde::{Deserialize, Serialize};

/// Default bound on resource hierarchy depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for [`Acl`](crate::Acl).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    /// Maximum number of resource nodes a single hierarchy walk may visit.
    pub max_depth: usize,
    /// Descriptor field names, least granular first.
    pub descriptor_fields: DescriptorSchema,
    /// Fail with `NotFound` when one of a user's roles has no actor node,
    /// instead of treating it as `Unset`. Direct role checks always fail.
    pub strict_roles: bool,
    /// How `is_allowed` maps an `Unset` verdict.
    pub default_policy: DefaultPolicy,
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            descriptor_fields: DescriptorSchema::default(),
            strict_roles: false,
            default_policy: DefaultPolicy::Deny,
        }
    }
}

impl AclConfig {
    /// Parses a TOML document and validates it.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| Error::config(format!("invalid ACL config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::config("max_depth must be at least 1"));
        }
        Ok(())
    }
}
