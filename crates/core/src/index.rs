//! Groups scanned classes under the roles whose type they reach.

use crate::closure::reaches;
use crate::error::DiscoveryError;
use crate::introspect::TypeIntrospector;
use crate::model::{
    ClassRef, DiscoveryReport, Implementation, ImplementationSet, RoleSpec, TypeKind,
};
use rayon::prelude::*;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct ImplementationIndex<'a, I: TypeIntrospector + ?Sized> {
    introspector: &'a I,
}

/// Per-candidate result, computed independently on a worker.
enum CandidateOutcome {
    Indexed { kind: TypeKind, matches: Vec<bool> },
    Excluded(DiscoveryError),
}

impl<'a, I: TypeIntrospector + ?Sized> ImplementationIndex<'a, I> {
    pub fn new(introspector: &'a I) -> Self {
        Self { introspector }
    }

    /// Builds one [`ImplementationSet`] per role, in role order.
    ///
    /// Every role is present in the result even when nothing implements it.
    /// Candidates keep their input order inside each set regardless of how
    /// the checks were scheduled.
    pub fn build(&self, roles: &[RoleSpec], candidates: &[ClassRef]) -> DiscoveryReport {
        let start = Instant::now();
        let mut report = DiscoveryReport::default();
        let scanned: HashSet<&str> = candidates.iter().map(|c| c.fqn.as_str()).collect();

        // Roles whose own type is absent from the classpath stay empty.
        let active: Vec<bool> = roles
            .iter()
            .map(|role| match self.introspector.describe(&role.fqn) {
                Ok(_) => true,
                Err(DiscoveryError::TypeNotFound(_)) => {
                    warn!(
                        role = %role.name,
                        fqn = %role.fqn,
                        "role type not found on classpath"
                    );
                    report.warnings.push(DiscoveryError::RoleTypeNotFound {
                        role: role.name.clone(),
                        fqn: role.fqn.clone(),
                    });
                    false
                }
                Err(e) => {
                    // Candidates may still name it as a supertype. A scanned
                    // role type is reported once, when it is excluded below.
                    warn!(role = %role.name, error = %e, "role type not describable");
                    if !scanned.contains(role.fqn.as_str()) {
                        report.warnings.push(e);
                    }
                    true
                }
            })
            .collect();

        let outcomes: Vec<CandidateOutcome> = candidates
            .par_iter()
            .map(|candidate| self.check(candidate, roles, &active))
            .collect();

        let mut members: Vec<Vec<Implementation>> = vec![Vec::new(); roles.len()];
        for (candidate, outcome) in candidates.iter().zip(outcomes) {
            match outcome {
                CandidateOutcome::Indexed { kind, matches } => {
                    for (slot, matched) in members.iter_mut().zip(matches) {
                        if matched {
                            slot.push(Implementation {
                                class: candidate.clone(),
                                kind,
                            });
                        }
                    }
                }
                CandidateOutcome::Excluded(e) => {
                    warn!(fqn = %candidate.fqn, error = %e, "candidate excluded");
                    report.warnings.push(e);
                }
            }
        }

        for (role, implementations) in roles.iter().zip(members) {
            debug!(
                role = %role.name,
                count = implementations.len(),
                "role indexed"
            );
            report
                .implementations
                .insert(role.name.clone(), ImplementationSet::new(implementations));
        }

        info!(
            "Indexed {} candidates against {} roles in {:?}",
            candidates.len(),
            roles.len(),
            start.elapsed()
        );

        report
    }

    fn check(&self, candidate: &ClassRef, roles: &[RoleSpec], active: &[bool]) -> CandidateOutcome {
        let descriptor = match self.introspector.describe(&candidate.fqn) {
            Ok(descriptor) => descriptor,
            Err(e) => return CandidateOutcome::Excluded(e),
        };

        let matches = roles
            .iter()
            .zip(active)
            .map(|(role, &enabled)| {
                enabled && reaches(self.introspector, &candidate.fqn, &role.fqn)
            })
            .collect();

        CandidateOutcome::Indexed {
            kind: descriptor.kind,
            matches,
        }
    }
}
