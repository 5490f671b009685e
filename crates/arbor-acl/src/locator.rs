//! Resource locator: maps a descriptor to the nearest enclosing resource node.
//!
//! The exact descriptor is tried first. On a miss the most granular
//! populated field (by schema order) is cleared and the search repeats, so
//! a rule on `Posts` covers `Posts/edit/5` when nothing more specific is
//! defined.

use arbor_core::{Descriptor, DescriptorSchema, PermissionStore, ResourceId, Result};

/// Generalization search over resource descriptors.
#[derive(Clone, Copy)]
pub struct ResourceLocator<'a> {
    store: &'a dyn PermissionStore,
    schema: &'a DescriptorSchema,
}

impl<'a> ResourceLocator<'a> {
    /// Creates a locator over `store`, generalizing in `schema` order.
    pub fn new(store: &'a dyn PermissionStore, schema: &'a DescriptorSchema) -> Self {
        Self { store, schema }
    }

    /// Finds the resource for `descriptor`, generalizing on misses.
    ///
    /// Returns `Ok(None)` when no generalization level matches; that is the
    /// normal "no rule defined" outcome, not an error. An empty descriptor
    /// never matches.
    ///
    /// # Errors
    ///
    /// `Validation` if the descriptor populates a field outside the schema,
    /// plus any store error.
    pub async fn locate(&self, descriptor: &Descriptor) -> Result<Option<ResourceId>> {
        if descriptor.is_empty() {
            log::debug!("Locator: empty descriptor, nothing to look up");
            return Ok(None);
        }

        let mut candidate = self.schema.normalize(descriptor)?;
        loop {
            log::trace!("Locator: trying {candidate}");
            if let Some(id) = self.store.find_resource(&candidate).await? {
                log::debug!("Locator: {descriptor} -> resource {id} (matched {candidate})");
                return Ok(Some(id));
            }
            match candidate.generalize() {
                Some(next) => candidate = next,
                None => {
                    log::debug!("Locator: no resource for {descriptor}");
                    return Ok(None);
                }
            }
        }
    }
}

impl std::fmt::Debug for ResourceLocator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceLocator")
            .field("store", &self.store.name())
            .field("schema", &self.schema.fields())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
