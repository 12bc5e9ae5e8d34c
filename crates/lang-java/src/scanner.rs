//! Class-path scanner.
//!
//! Walks class-file directories in the order given and yields one
//! [`ClassRef`] per loadable class. Within a directory entries are visited
//! by file name, so an unchanged tree always produces the same sequence.
//! A name already produced by an earlier root shadows later copies.

use crate::naming;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use svcwire_core::{ClassRef, DiscoveryError};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub struct ClassPathScanner {
    roots: Vec<PathBuf>,
}

impl ClassPathScanner {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Lazily walks every root. Root problems are collected on the returned
    /// iterator rather than aborting it.
    pub fn scan(&self) -> ClassScan<'_> {
        ClassScan {
            roots: self.roots.iter(),
            current: None,
            seen: HashSet::new(),
            warnings: Vec::new(),
        }
    }
}

pub struct ClassScan<'a> {
    roots: std::slice::Iter<'a, PathBuf>,
    current: Option<(&'a Path, walkdir::IntoIter)>,
    seen: HashSet<String>,
    warnings: Vec<DiscoveryError>,
}

impl<'a> ClassScan<'a> {
    /// Root warnings raised so far.
    pub fn warnings(&self) -> &[DiscoveryError] {
        &self.warnings
    }

    /// Drains the remaining classes and returns them with all root warnings.
    pub fn finish(mut self) -> (Vec<ClassRef>, Vec<DiscoveryError>) {
        let classes: Vec<ClassRef> = self.by_ref().collect();
        (classes, self.warnings)
    }

    fn open_root(&mut self, root: &Path) -> Option<walkdir::IntoIter> {
        let problem = match fs::metadata(root) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Some(DiscoveryError::RootNotFound(root.to_path_buf()))
            }
            Err(e) => Some(DiscoveryError::RootUnreadable {
                path: root.to_path_buf(),
                reason: e.to_string(),
            }),
            Ok(meta) if !meta.is_dir() => Some(DiscoveryError::RootUnreadable {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            }),
            Ok(_) => fs::read_dir(root)
                .err()
                .map(|e| DiscoveryError::RootUnreadable {
                    path: root.to_path_buf(),
                    reason: e.to_string(),
                }),
        };

        if let Some(problem) = problem {
            warn!("Skipping classpath root: {}", problem);
            self.warnings.push(problem);
            return None;
        }

        debug!("Scanning classpath root {}", root.display());
        // Links are followed so the scan sees what `ClassFileSource` reads;
        // walkdir reports link loops as entry errors.
        Some(
            WalkDir::new(root)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter(),
        )
    }
}

impl<'a> Iterator for ClassScan<'a> {
    type Item = ClassRef;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() {
                let root = self.roots.next()?;
                if let Some(walker) = self.open_root(root) {
                    self.current = Some((root.as_path(), walker));
                }
                continue;
            }

            let (root, walker) = self.current.as_mut()?;
            let root: &'a Path = *root;
            let entry = match walker.next() {
                None => {
                    self.current = None;
                    continue;
                }
                Some(Err(e)) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
                Some(Ok(entry)) => entry,
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(fqn) = naming::fqn_from_path(root, entry.path()) else {
                debug!("Not a class artifact: {}", entry.path().display());
                continue;
            };

            if !self.seen.insert(fqn.clone()) {
                debug!("{} shadowed by an earlier root: {}", fqn, entry.path().display());
                continue;
            }

            return Some(ClassRef::new(fqn, entry.into_path()));
        }
    }
}
