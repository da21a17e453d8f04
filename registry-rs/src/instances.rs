//! One instance per type

use crate::{RegistryError, Result};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

type SharedAny = Arc<dyn Any + Send + Sync>;

/// Holds at most one shared instance of each type.
///
/// Create one at startup and pass it (or an `Arc` of it) to the code that
/// needs the instances.
#[derive(Default)]
pub struct InstanceRegistry {
    instances: RwLock<HashMap<TypeId, (&'static str, SharedAny)>>,
}

impl fmt::Debug for InstanceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instances = self.instances.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("InstanceRegistry")
            .field("types", &instances.values().map(|(name, _)| *name).collect::<Vec<_>>())
            .finish()
    }
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `instance` unless one of its type exists; returns the
    /// registered instance either way
    pub fn insert<T: Any + Send + Sync>(&self, instance: T) -> Arc<T> {
        self.get_or_init(|| instance)
    }

    /// Register `instance`, replacing any existing instance of its type
    pub fn replace<T: Any + Send + Sync>(&self, instance: T) -> Arc<T> {
        let instance = Arc::new(instance);
        let mut instances = self.instances.write().unwrap_or_else(PoisonError::into_inner);
        let shared: SharedAny = instance.clone();
        if instances.insert(TypeId::of::<T>(), (type_name::<T>(), shared)).is_some() {
            tracing::debug!(instance = type_name::<T>(), "instance replaced");
        }
        instance
    }

    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let instances = self.instances.read().unwrap_or_else(PoisonError::into_inner);
        instances
            .get(&TypeId::of::<T>())
            .and_then(|(_, shared)| Arc::clone(shared).downcast::<T>().ok())
    }

    /// The instance of `T`, constructing it with `init` on first use.
    ///
    /// `init` runs without the lock held; if another caller registers a `T`
    /// first, that instance is returned instead.
    pub fn get_or_init<T, F>(&self, init: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.get::<T>() {
            return existing;
        }

        let instance = Arc::new(init());
        let mut instances = self.instances.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = instances
            .get(&TypeId::of::<T>())
            .and_then(|(_, shared)| Arc::clone(shared).downcast::<T>().ok())
        {
            return existing;
        }

        tracing::debug!(instance = type_name::<T>(), "instance created");
        let shared: SharedAny = instance.clone();
        instances.insert(TypeId::of::<T>(), (type_name::<T>(), shared));
        instance
    }

    /// The instance of `T`, or [`RegistryError::NotFound`]
    pub fn require<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.get::<T>()
            .ok_or(RegistryError::NotFound(type_name::<T>()))
    }

    pub fn remove<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let mut instances = self.instances.write().unwrap_or_else(PoisonError::into_inner);
        instances
            .remove(&TypeId::of::<T>())
            .and_then(|(_, shared)| shared.downcast::<T>().ok())
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.instances.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
