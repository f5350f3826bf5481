use crate::{Result, TypeDescriptor};
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Process-wide store of [`TypeDescriptor`]s keyed by record type identity.
///
/// Entries are never evicted. Readers share the lock, building a missing descriptor takes it
/// exclusively and re-checks, so each type is built once even when first seen concurrently.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    descriptors: RwLock<HashMap<TypeId, Arc<TypeDescriptor>>>,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&self, id: TypeId) -> Option<Arc<TypeDescriptor>> {
        // Insert-only map, a poisoned lock still holds consistent entries
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn get_or_try_insert_with<F>(&self, id: TypeId, build: F) -> Result<Arc<TypeDescriptor>>
    where
        F: FnOnce() -> Result<TypeDescriptor>,
    {
        if let Some(descriptor) = self.get(id) {
            return Ok(descriptor);
        }
        let mut descriptors = self
            .descriptors
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(descriptor) = descriptors.get(&id) {
            return Ok(descriptor.clone());
        }
        let descriptor = Arc::new(build()?);
        log::debug!(
            "Cached the descriptor of {} ({} mapped columns)",
            descriptor.type_name(),
            descriptor.len()
        );
        descriptors.insert(id, descriptor.clone());
        Ok(descriptor)
    }

    /// Stores `descriptor`, replacing any previous entry for the same type.
    pub fn insert(&self, id: TypeId, descriptor: TypeDescriptor) -> Arc<TypeDescriptor> {
        let descriptor = Arc::new(descriptor);
        let previous = self
            .descriptors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, descriptor.clone());
        log::debug!(
            "{} the descriptor of {} ({} mapped columns)",
            if previous.is_some() { "Replaced" } else { "Cached" },
            descriptor.type_name(),
            descriptor.len()
        );
        descriptor
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    /// Number of distinct record types cached so far.
    pub fn len(&self) -> usize {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
