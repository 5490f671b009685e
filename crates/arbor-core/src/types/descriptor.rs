//! Named-field resource addresses.
//!
//! A [`Descriptor`] addresses a resource by fields such as
//! `controller/action/param` rather than by id. Fields are ordered from
//! least to most granular; the generalization search clears them from the
//! end. The field names themselves come from a [`DescriptorSchema`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::{Error, Result};

/// Default descriptor fields, least granular first.
pub const DEFAULT_DESCRIPTOR_FIELDS: [&str; 3] = ["controller", "action", "param"];

/// Number of leading schema fields filled from a route's operation and
/// sub-operation.
pub const ROUTE_FIELDS: usize = 2;

// ============================================================================
// Descriptor
// ============================================================================

/// A single descriptor field. `None` means absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field value, if populated.
    pub value: Option<String>,
}

/// An ordered set of named fields locating a resource node.
///
/// # Examples
///
/// ```
/// use arbor_core::Descriptor;
///
/// let d = Descriptor::from_pairs([("controller", "Posts"), ("action", "edit")]);
/// let general = d.generalize().unwrap();
/// assert_eq!(general.get("controller"), Some("Posts"));
/// assert_eq!(general.get("action"), None);
/// assert!(general.generalize().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Descriptor {
    fields: Vec<Field>,
}

impl Descriptor {
    /// Creates a descriptor with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a descriptor from populated `(name, value)` pairs. Fields keep
    /// the given order; [`DescriptorSchema::normalize`] restores schema order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |d, (k, v)| d.with_field(k, Some(v.into())))
    }

    /// Adds a field, or replaces the value of an existing one in place.
    pub fn with_field<K: Into<String>>(mut self, name: K, value: Option<String>) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value = value,
            None => self.fields.push(Field { name, value }),
        }
        self
    }

    /// Value of a field, if present and populated.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.value.as_deref())
    }

    /// Populates an existing field.
    ///
    /// Fails if the descriptor has no field with this name.
    pub fn set<V: Into<String>>(&mut self, name: &str, value: V) -> Result<()> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| Error::validation(format!("unknown descriptor field '{name}'")))?;
        field.value = Some(value.into());
        Ok(())
    }

    /// All fields in order, populated or not.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_deref()))
    }

    /// Populated fields in order.
    pub fn populated(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|f| f.value.as_deref().map(|v| (f.name.as_str(), v)))
    }

    /// Number of populated fields.
    pub fn populated_len(&self) -> usize {
        self.populated().count()
    }

    /// Returns `true` if no field is populated.
    pub fn is_empty(&self) -> bool {
        self.populated_len() == 0
    }

    /// Exact match: both descriptors populate the same fields with equal
    /// values. Field order and absent fields are ignored.
    pub fn matches(&self, other: &Descriptor) -> bool {
        let lhs: BTreeMap<&str, &str> = self.populated().collect();
        let rhs: BTreeMap<&str, &str> = other.populated().collect();
        lhs == rhs
    }

    /// The next, more general descriptor: the most granular populated field
    /// cleared.
    ///
    /// Returns `None` once a single populated field remains; the least
    /// granular field is never dropped.
    pub fn generalize(&self) -> Option<Descriptor> {
        if self.populated_len() <= 1 {
            return None;
        }
        let mut next = self.clone();
        if let Some(field) = next.fields.iter_mut().rev().find(|f| f.value.is_some()) {
            field.value = None;
        }
        Some(next)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .populated()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

// ============================================================================
// DescriptorSchema
// ============================================================================

/// The configured descriptor field names, least granular first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct DescriptorSchema {
    fields: Vec<String>,
}

impl DescriptorSchema {
    /// Creates a schema. Field names must be non-empty and unique.
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(Error::validation("descriptor schema needs at least one field"));
        }
        let mut seen = HashSet::new();
        for name in &fields {
            if name.trim().is_empty() {
                return Err(Error::validation("descriptor field names must not be empty"));
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::validation(format!(
                    "duplicate descriptor field '{name}'"
                )));
            }
        }
        Ok(Self { fields })
    }

    /// Field names in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The most granular field (the one a routed parameter fills).
    pub fn last_field(&self) -> &str {
        self.fields.last().map(String::as_str).unwrap_or_default()
    }

    /// A descriptor with every schema field absent.
    pub fn empty(&self) -> Descriptor {
        self.fields
            .iter()
            .fold(Descriptor::new(), |d, name| d.with_field(name.clone(), None))
    }

    /// Builds a descriptor from positional values. Empty values are absent.
    pub fn descriptor<I, S>(&self, values: I) -> Result<Descriptor>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut descriptor = self.empty();
        for (i, value) in values.into_iter().enumerate() {
            let name = self.fields.get(i).ok_or_else(|| {
                Error::validation(format!(
                    "descriptor has more than {} fields",
                    self.fields.len()
                ))
            })?;
            let value = value.as_ref().trim();
            if !value.is_empty() {
                descriptor.set(name, value)?;
            }
        }
        Ok(descriptor)
    }

    /// Parses a slash-separated path such as `Posts/edit/5`.
    pub fn parse_path(&self, path: &str) -> Result<Descriptor> {
        let trimmed = path.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(Error::validation("empty resource path"));
        }
        self.descriptor(trimmed.split('/'))
    }

    /// The field a routed parameter fills.
    ///
    /// The first [`ROUTE_FIELDS`] fields hold the operation and
    /// sub-operation; the parameter goes in the last field only when the
    /// schema has one beyond them.
    pub fn param_field(&self) -> Option<&str> {
        if self.fields.len() > ROUTE_FIELDS {
            self.fields.last().map(String::as_str)
        } else {
            None
        }
    }

    /// Rebuilds `descriptor` in schema field order, so that
    /// [`Descriptor::generalize`] drops the most granular schema field.
    ///
    /// Fails if the descriptor populates a field the schema does not define.
    pub fn normalize(&self, descriptor: &Descriptor) -> Result<Descriptor> {
        let mut normalized = self.empty();
        for (name, value) in descriptor.populated() {
            normalized.set(name, value)?;
        }
        Ok(normalized)
    }
}

impl Default for DescriptorSchema {
    fn default() -> Self {
        Self {
            fields: DEFAULT_DESCRIPTOR_FIELDS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl TryFrom<Vec<String>> for DescriptorSchema {
    type Error = Error;

    fn try_from(fields: Vec<String>) -> Result<Self> {
        Self::new(fields)
    }
}

impl From<DescriptorSchema> for Vec<String> {
    fn from(schema: DescriptorSchema) -> Self {
        schema.fields
    }
}
