//! End-to-end discovery over class-file directories.

use crate::classfile::ClassFileSource;
use crate::scanner::ClassPathScanner;
use std::time::Instant;
use svcwire_core::{
    CachedIntrospector, ClassRef, DiscoveryConfig, DiscoveryError, DiscoveryReport,
    ImplementationIndex, Result, TypeIntrospector,
};
use tracing::info;

pub struct JavaDiscovery {
    config: DiscoveryConfig,
}

impl JavaDiscovery {
    /// Rejects structurally invalid configuration up front; nothing after
    /// this point aborts the run.
    pub fn new(config: DiscoveryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn scanner(&self) -> ClassPathScanner {
        ClassPathScanner::new(self.config.classpath.iter().cloned())
    }

    /// A fresh introspector whose cache lives as long as the returned value.
    pub fn introspector(&self) -> CachedIntrospector<ClassFileSource> {
        CachedIntrospector::new(ClassFileSource::new(self.config.classpath.iter().cloned()))
    }

    pub fn scan(&self) -> (Vec<ClassRef>, Vec<DiscoveryError>) {
        let start = Instant::now();
        let (classes, warnings) = self.scanner().scan().finish();
        info!(
            "Scanned {} roots: {} classes, {} warnings in {:?}",
            self.config.classpath.len(),
            classes.len(),
            warnings.len(),
            start.elapsed()
        );
        (classes, warnings)
    }

    pub fn run(&self) -> DiscoveryReport {
        self.run_with(&self.introspector())
    }

    /// Runs against a caller-supplied introspector, e.g. one shared across
    /// several runs over the same unchanged classpath.
    pub fn run_with<I: TypeIntrospector + ?Sized>(&self, introspector: &I) -> DiscoveryReport {
        let (candidates, mut warnings) = self.scan();
        let roles = self.config.role_specs();

        let mut report = ImplementationIndex::new(introspector).build(&roles, &candidates);

        warnings.append(&mut report.warnings);
        report.warnings = warnings;

        info!(
            "Discovery complete: {} roles, {} warnings",
            report.implementations.len(),
            report.warnings.len()
        );
        report
    }
}
