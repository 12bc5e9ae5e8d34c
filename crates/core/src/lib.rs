pub mod closure;
pub mod config;
pub mod error;
pub mod index;
pub mod introspect;
pub mod logging;
pub mod model;

pub use config::DiscoveryConfig;
pub use error::{DiscoveryError, Result};
pub use index::ImplementationIndex;
pub use introspect::{CachedIntrospector, DescriptorSource, TypeIntrospector};
pub use model::{
    ClassRef, DiscoveryReport, Implementation, ImplementationSet, RoleSpec, TypeDescriptor,
    TypeKind,
};
