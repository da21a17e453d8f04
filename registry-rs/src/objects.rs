//! Named object registry

use crate::keys::{KeyNormalizer, LowercaseTrimmed};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

/// Instances of `T` stored under keys normalized by `N`
pub struct ObjectsRegistry<T, N: KeyNormalizer = LowercaseTrimmed> {
    instances: RwLock<HashMap<String, Arc<T>>>,
    normalizer: PhantomData<N>,
}

impl<T, N: KeyNormalizer> Default for ObjectsRegistry<T, N> {
    fn default() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            normalizer: PhantomData,
        }
    }
}

impl<T, N: KeyNormalizer> fmt::Debug for ObjectsRegistry<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instances = self.instances.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ObjectsRegistry")
            .field("keys", &instances.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T, N: KeyNormalizer> ObjectsRegistry<T, N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `instance`, replacing any instance under the same normalized key
    pub fn set(&self, key: &str, instance: T) -> Arc<T> {
        self.set_shared(key, Arc::new(instance))
    }

    pub fn set_shared(&self, key: &str, instance: Arc<T>) -> Arc<T> {
        let key = N::normalize(key);
        let mut instances = self.instances.write().unwrap_or_else(PoisonError::into_inner);
        if instances.insert(key.clone(), Arc::clone(&instance)).is_some() {
            tracing::debug!(key = %key, "registry instance replaced");
        }
        instance
    }

    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        let instances = self.instances.read().unwrap_or_else(PoisonError::into_inner);
        instances.get(&N::normalize(key)).cloned()
    }

    /// Existing instance for `key`, or one built by `create` from the normalized key.
    ///
    /// `create` runs without the lock held and may use the registry. If another
    /// caller stores the key first, that instance wins and the new one is dropped.
    pub fn get_or_create<F>(&self, key: &str, create: F) -> Arc<T>
    where
        F: FnOnce(&str) -> T,
    {
        let key = N::normalize(key);
        {
            let instances = self.instances.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(existing) = instances.get(&key) {
                return Arc::clone(existing);
            }
        }

        tracing::debug!(key = %key, "creating registry instance");
        let created = Arc::new(create(&key));

        let mut instances = self.instances.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(instances.entry(key).or_insert(created))
    }

    pub fn has(&self, key: &str) -> bool {
        let instances = self.instances.read().unwrap_or_else(PoisonError::into_inner);
        instances.contains_key(&N::normalize(key))
    }

    pub fn unset(&self, key: &str) -> Option<Arc<T>> {
        let mut instances = self.instances.write().unwrap_or_else(PoisonError::into_inner);
        instances.remove(&N::normalize(key))
    }

    pub fn flush(&self) {
        self.instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn count(&self) -> usize {
        self.instances.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Snapshot of every normalized key and its instance
    pub fn all(&self) -> HashMap<String, Arc<T>> {
        self.instances.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
