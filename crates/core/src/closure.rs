//! Supertype closure over extends/implements edges.

use crate::error::DiscoveryError;
use crate::introspect::TypeIntrospector;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, trace};

/// Breadth-first walk yielding `start` and then every name reachable from it
/// through superclass and interface edges, each exactly once.
///
/// A name is expanded only when the walk advances past it, so stopping at a
/// match never reads that type. Names that cannot be described end their
/// branch; names already visited are not enqueued again, which bounds the
/// walk on cyclic hierarchies.
pub struct SupertypeWalk<'a, I: TypeIntrospector + ?Sized> {
    introspector: &'a I,
    queue: VecDeque<String>,
    visited: HashSet<String>,
    pending: Option<String>,
}

impl<'a, I: TypeIntrospector + ?Sized> SupertypeWalk<'a, I> {
    pub fn new(introspector: &'a I, start: &str) -> Self {
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        queue.push_back(start.to_string());
        visited.insert(start.to_string());

        Self {
            introspector,
            queue,
            visited,
            pending: None,
        }
    }

    fn expand(&mut self, fqn: &str) {
        let descriptor = match self.introspector.describe(fqn) {
            Ok(descriptor) => descriptor,
            Err(DiscoveryError::TypeNotFound(_)) => {
                trace!(fqn, "supertype outside classpath, branch ends");
                return;
            }
            Err(e) => {
                debug!(fqn, error = %e, "supertype not describable, branch ends");
                return;
            }
        };

        for parent in descriptor.supertypes() {
            if self.visited.insert(parent.to_string()) {
                self.queue.push_back(parent.to_string());
            } else {
                trace!(fqn, parent, "supertype already visited");
            }
        }
    }
}

impl<'a, I: TypeIntrospector + ?Sized> Iterator for SupertypeWalk<'a, I> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(previous) = self.pending.take() {
            self.expand(&previous);
        }

        let next = self.queue.pop_front()?;
        self.pending = Some(next.clone());
        Some(next)
    }
}

/// Whether `target` is reachable from `start` by zero or more supertype edges.
pub fn reaches<I: TypeIntrospector + ?Sized>(introspector: &I, start: &str, target: &str) -> bool {
    SupertypeWalk::new(introspector, start).any(|fqn| fqn == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::model::{TypeDescriptor, TypeKind};
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Hierarchy held in memory: name -> (superclass, interfaces).
    struct Graph(HashMap<&'static str, (Option<&'static str>, Vec<&'static str>)>);

    impl TypeIntrospector for Graph {
        fn describe(&self, fqn: &str) -> Result<Arc<TypeDescriptor>> {
            let (super_class, interfaces) = self
                .0
                .get(fqn)
                .ok_or_else(|| DiscoveryError::TypeNotFound(fqn.to_string()))?;
            Ok(Arc::new(TypeDescriptor {
                fqn: fqn.to_string(),
                kind: TypeKind::Class,
                super_class: (*super_class).map(str::to_string),
                interfaces: interfaces.iter().map(|s| s.to_string()).collect(),
            }))
        }
    }

    #[test]
    fn test_walk_is_breadth_first_and_unique() {
        let graph = Graph(HashMap::from([
            ("Impl", (Some("Base"), vec!["Role"])),
            ("Base", (Some("java.lang.Object"), vec!["Role"])),
            ("Role", (None, vec![])),
        ]));

        let walked: Vec<_> = SupertypeWalk::new(&graph, "Impl").collect();
        assert_eq!(walked, vec!["Impl", "Base", "Role", "java.lang.Object"]);
    }

    #[test]
    fn test_reaches_is_reflexive_and_transitive() {
        let graph = Graph(HashMap::from([
            ("B", (Some("A"), vec![])),
            ("A", (None, vec!["RoleX"])),
            ("RoleX", (None, vec![])),
        ]));

        assert!(reaches(&graph, "RoleX", "RoleX"));
        assert!(reaches(&graph, "B", "RoleX"));
        assert!(!reaches(&graph, "RoleX", "B"));
    }

    #[test]
    fn test_cycles_terminate_without_match() {
        let graph = Graph(HashMap::from([
            ("A", (Some("B"), vec![])),
            ("B", (Some("A"), vec![])),
            ("Self", (Some("Self"), vec!["Self"])),
        ]));

        assert!(!reaches(&graph, "A", "RoleX"));
        assert!(!reaches(&graph, "Self", "RoleX"));
        assert_eq!(SupertypeWalk::new(&graph, "A").count(), 2);
    }

    #[test]
    fn test_unknown_start_yields_only_itself() {
        let graph = Graph(HashMap::new());
        let walked: Vec<_> = SupertypeWalk::new(&graph, "ghost.Type").collect();
        assert_eq!(walked, vec!["ghost.Type"]);
    }
}
