//! The tri-state permission verdict.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Outcome of a permission resolution.
///
/// Stored edges carry the integer encoding used by ACL tables
/// (`-1`, `0`, `1`). When aggregating across roles, `Deny` outranks
/// `Grant`; `Unset` never outranks either.
///
/// # Examples
///
/// ```
/// use arbor_core::{DefaultPolicy, Verdict};
///
/// assert_eq!(Verdict::try_from(-1).unwrap(), Verdict::Deny);
/// assert!(Verdict::Grant.allows(DefaultPolicy::Deny));
/// assert!(!Verdict::Unset.allows(DefaultPolicy::Deny));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Access explicitly denied.
    Deny,
    /// No rule recorded for this actor on this resource or its ancestors.
    #[default]
    Unset,
    /// Access explicitly granted.
    Grant,
}

impl Verdict {
    /// Integer encoding (`-1`, `0`, `1`).
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Deny => -1,
            Self::Unset => 0,
            Self::Grant => 1,
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deny => "deny",
            Self::Unset => "unset",
            Self::Grant => "grant",
        }
    }

    /// Returns `true` for [`Verdict::Grant`].
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Grant)
    }

    /// Returns `true` for [`Verdict::Deny`].
    pub fn is_denied(self) -> bool {
        matches!(self, Self::Deny)
    }

    /// Returns `true` for [`Verdict::Unset`].
    pub fn is_unset(self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Collapse to a boolean, resolving `Unset` with the caller's policy.
    pub fn allows(self, policy: DefaultPolicy) -> bool {
        match self {
            Self::Grant => true,
            Self::Deny => false,
            Self::Unset => policy == DefaultPolicy::Allow,
        }
    }
}

impl TryFrom<i8> for Verdict {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self> {
        match value {
            -1 => Ok(Self::Deny),
            0 => Ok(Self::Unset),
            1 => Ok(Self::Grant),
            other => Err(Error::validation(format!(
                "invalid verdict encoding {other} (expected -1, 0 or 1)"
            ))),
        }
    }
}

impl From<Verdict> for i8 {
    fn from(verdict: Verdict) -> Self {
        verdict.as_i8()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the same names serde accepts (`deny`, `unset`, `grant`). The
/// integer encoding goes through `TryFrom<i8>`.
impl FromStr for Verdict {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "deny" => Ok(Self::Deny),
            "unset" => Ok(Self::Unset),
            "grant" => Ok(Self::Grant),
            other => Err(Error::validation(format!(
                "unknown verdict '{other}' (expected deny, unset or grant)"
            ))),
        }
    }
}

/// How callers map [`Verdict::Unset`] to an access decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultPolicy {
    /// Unset means denied.
    #[default]
    Deny,
    /// Unset means allowed.
    Allow,
}
