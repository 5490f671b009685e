//! CLI configuration file.
//!
//! ```toml
//! [acl]
//! max_depth = 64
//! descriptor_fields = ["controller", "action", "param"]
//! strict_roles = false
//! default_policy = "deny"
//!
//! [store]
//! fixture = "acl.toml"
//!
//! [logging]
//! level = "warn"
//! ```
//!
//! The file location is `--config` (or `ARBOR_CONFIG`), falling back to
//! `<config dir>/arbor/config.toml`. A missing file yields the defaults.

use std::path::{Path, PathBuf};

use arbor_acl::AclConfig;
use arbor_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Application name used for the config directory.
pub const PROJECT_NAME: &str = "arbor";

/// Top-level configuration for the `arbor` binary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArborConfig {
    /// Resolver settings.
    pub acl: AclConfig,
    /// Where permission data comes from.
    pub store: StoreConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

/// Store settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Fixture used when `--fixture` is not given. Relative paths are
    /// resolved against the config file's directory.
    pub fixture: Option<PathBuf>,
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `warn` or
    /// `arbor_acl=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl ArborConfig {
    /// `<config dir>/arbor/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// The explicit path if given, else the default location.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Loads the configuration, falling back to defaults when the file does
    /// not exist.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::load_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads and validates a config file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let mut config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;
        if let (Some(fixture), Some(dir)) = (&config.store.fixture, path.parent())
            && fixture.is_relative()
        {
            config.store.fixture = Some(dir.join(fixture));
        }
        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| Error::config(format!("invalid config: {e}")))?;
        config.acl.validate()?;
        Ok(config)
    }

    /// Serializes to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
