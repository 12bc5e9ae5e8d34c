//! Class-file descriptor source.
//!
//! Reads `.class` artifacts from the classpath and extracts only what the
//! supertype closure needs: the declared name, the access flags, the
//! superclass and the direct interfaces. Nothing in the artifact is run.

use crate::naming;
use ristretto_classfile::{ClassAccessFlags, ClassFile};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use svcwire_core::{DescriptorSource, DiscoveryError, Result, TypeDescriptor, TypeKind};
use tracing::trace;

pub const CLASS_MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];

/// Java 1.1
pub const MIN_MAJOR_VERSION: u16 = 45;
/// Java 25
pub const MAX_MAJOR_VERSION: u16 = 69;

/// Resolves names against class-file directories, first root wins.
pub struct ClassFileSource {
    roots: Vec<PathBuf>,
    reads: AtomicUsize,
}

impl ClassFileSource {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            reads: AtomicUsize::new(0),
        }
    }

    /// Path of the artifact that defines `fqn`, if any root has one.
    pub fn locate(&self, fqn: &str) -> Option<PathBuf> {
        let relative = naming::relative_path_for(fqn)?;
        self.roots
            .iter()
            .map(|root| root.join(&relative))
            .find(|candidate| candidate.is_file())
    }

    /// Number of artifacts read from disk so far.
    pub fn artifact_reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl DescriptorSource for ClassFileSource {
    fn load(&self, fqn: &str) -> Result<TypeDescriptor> {
        let path = self
            .locate(fqn)
            .ok_or_else(|| DiscoveryError::TypeNotFound(fqn.to_string()))?;

        let malformed = |reason: String| DiscoveryError::MalformedType {
            fqn: fqn.to_string(),
            path: path.clone(),
            reason,
        };

        let bytes = std::fs::read(&path).map_err(|e| malformed(format!("cannot read: {e}")))?;
        self.reads.fetch_add(1, Ordering::Relaxed);
        trace!(fqn, path = %path.display(), "read class artifact");

        let descriptor = parse_descriptor(bytes).map_err(malformed)?;
        if descriptor.fqn != fqn {
            return Err(DiscoveryError::MalformedType {
                fqn: fqn.to_string(),
                path,
                reason: format!("declares {} instead", descriptor.fqn),
            });
        }
        Ok(descriptor)
    }
}

/// Checks magic and version before handing the bytes to the full parser,
/// so the common failure modes get a readable reason.
pub fn check_header(bytes: &[u8]) -> std::result::Result<(), String> {
    if bytes.len() < 10 {
        return Err(format!("truncated header ({} bytes)", bytes.len()));
    }
    if bytes[..4] != CLASS_MAGIC {
        return Err("not a class file (bad magic)".to_string());
    }
    let major = u16::from_be_bytes([bytes[6], bytes[7]]);
    if !(MIN_MAJOR_VERSION..=MAX_MAJOR_VERSION).contains(&major) {
        return Err(format!("unsupported class file version {major}"));
    }
    Ok(())
}

/// Parses a class file into its descriptor. The error is a human-readable
/// reason; callers attach the name and path.
pub fn parse_descriptor(bytes: Vec<u8>) -> std::result::Result<TypeDescriptor, String> {
    check_header(&bytes)?;

    let class = ClassFile::from_bytes(&mut Cursor::new(bytes))
        .map_err(|e| format!("failed to parse class: {e:?}"))?;
    let pool = &class.constant_pool;

    let fqn = pool
        .try_get_class(class.this_class)
        .map(|name| naming::from_internal(name))
        .map_err(|e| format!("invalid this_class: {e:?}"))?;

    // Only java.lang.Object and module-info carry no superclass.
    let super_class = match class.super_class {
        0 => None,
        index => Some(
            pool.try_get_class(index)
                .map(|name| naming::from_internal(name))
                .map_err(|e| format!("invalid super_class: {e:?}"))?,
        ),
    };

    let interfaces = class
        .interfaces
        .iter()
        .map(|&index| {
            pool.try_get_class(index)
                .map(|name| naming::from_internal(name))
                .map_err(|e| format!("invalid interface entry: {e:?}"))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(TypeDescriptor {
        fqn,
        kind: kind_of(class.access_flags),
        super_class,
        interfaces,
    })
}

pub fn kind_of(flags: ClassAccessFlags) -> TypeKind {
    if flags.contains(ClassAccessFlags::ANNOTATION) {
        TypeKind::Annotation
    } else if flags.contains(ClassAccessFlags::INTERFACE) {
        TypeKind::Interface
    } else if flags.contains(ClassAccessFlags::ENUM) {
        TypeKind::Enum
    } else if flags.contains(ClassAccessFlags::ABSTRACT) {
        TypeKind::AbstractClass
    } else {
        TypeKind::Class
    }
}
