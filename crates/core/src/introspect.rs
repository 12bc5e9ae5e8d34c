//! Type introspection seam and its read-through descriptor cache.
//!
//! A [`DescriptorSource`] knows how to turn a name into a [`TypeDescriptor`]
//! by reading some artifact. [`CachedIntrospector`] wraps a source so each
//! name is read at most once per discovery run, and is safe to share across
//! worker threads.

use crate::error::Result;
use crate::model::TypeDescriptor;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::trace;

/// Answers "what are this type's direct supertypes?" without running it.
pub trait TypeIntrospector: Send + Sync {
    /// Fails with `TypeNotFound` when nothing on the classpath matches and
    /// with `MalformedType` when the artifact cannot be parsed.
    fn describe(&self, fqn: &str) -> Result<Arc<TypeDescriptor>>;
}

/// Uncached access to the artifacts backing type names.
pub trait DescriptorSource: Send + Sync {
    fn load(&self, fqn: &str) -> Result<TypeDescriptor>;
}

pub struct CachedIntrospector<S> {
    source: S,
    cache: DashMap<String, Arc<TypeDescriptor>>,
}

impl<S: DescriptorSource> CachedIntrospector<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: DashMap::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of descriptors currently cached.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl<S: DescriptorSource> TypeIntrospector for CachedIntrospector<S> {
    fn describe(&self, fqn: &str) -> Result<Arc<TypeDescriptor>> {
        if let Some(hit) = self.cache.get(fqn) {
            trace!(fqn, "descriptor cache hit");
            return Ok(Arc::clone(hit.value()));
        }

        // Built outside the shard lock; a concurrent racer for the same name
        // does redundant work but whichever insert lands first is kept.
        // Failures are not cached.
        let descriptor = Arc::new(self.source.load(fqn)?);
        let entry = self.cache.entry(fqn.to_string()).or_insert(descriptor);
        Ok(Arc::clone(entry.value()))
    }
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for &T {
    fn describe(&self, fqn: &str) -> Result<Arc<TypeDescriptor>> {
        (**self).describe(fqn)
    }
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for Arc<T> {
    fn describe(&self, fqn: &str) -> Result<Arc<TypeDescriptor>> {
        (**self).describe(fqn)
    }
}
