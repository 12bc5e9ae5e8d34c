#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

const ACC_PUBLIC: u16 = 0x0001;
const ACC_FINAL: u16 = 0x0010;
const ACC_SUPER: u16 = 0x0020;
const ACC_INTERFACE: u16 = 0x0200;
const ACC_ABSTRACT: u16 = 0x0400;
const ACC_ANNOTATION: u16 = 0x2000;
const ACC_ENUM: u16 = 0x4000;

const CONSTANT_UTF8: u8 = 1;
const CONSTANT_CLASS: u8 = 7;

/// Minimal class file: header, constant pool with the referenced names,
/// access flags, this/super/interfaces and no members.
#[derive(Clone)]
pub struct ClassSpec {
    name: String,
    super_name: Option<String>,
    interfaces: Vec<String>,
    access: u16,
    major: u16,
}

/// A public concrete class extending `java.lang.Object`.
pub fn class(name: &str) -> ClassSpec {
    ClassSpec {
        name: name.to_string(),
        super_name: Some("java.lang.Object".to_string()),
        interfaces: Vec::new(),
        access: ACC_PUBLIC | ACC_SUPER,
        major: 52,
    }
}

/// A public interface; like javac output its superclass is `java.lang.Object`.
pub fn interface(name: &str) -> ClassSpec {
    ClassSpec {
        access: ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT,
        ..class(name)
    }
}

impl ClassSpec {
    pub fn extends(mut self, name: &str) -> Self {
        self.super_name = Some(name.to_string());
        self
    }

    pub fn no_super(mut self) -> Self {
        self.super_name = None;
        self
    }

    pub fn implements(mut self, name: &str) -> Self {
        self.interfaces.push(name.to_string());
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.access |= ACC_ABSTRACT;
        self
    }

    pub fn enum_type(mut self) -> Self {
        self.access |= ACC_FINAL | ACC_ENUM;
        self
    }

    pub fn annotation(mut self) -> Self {
        self.access = ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT | ACC_ANNOTATION;
        self
    }

    pub fn major(mut self, major: u16) -> Self {
        self.major = major;
        self
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut pool = Pool::default();
        let this_index = pool.class(&self.name);
        let super_index = self.super_name.as_deref().map_or(0, |s| pool.class(s));
        let interface_indexes: Vec<u16> = self.interfaces.iter().map(|i| pool.class(i)).collect();

        let mut out = vec![0xCA, 0xFE, 0xBA, 0xBE];
        put_u16(&mut out, 0);
        put_u16(&mut out, self.major);
        put_u16(&mut out, pool.count + 1);
        out.extend_from_slice(&pool.bytes);
        put_u16(&mut out, self.access);
        put_u16(&mut out, this_index);
        put_u16(&mut out, super_index);
        put_u16(&mut out, interface_indexes.len() as u16);
        for index in interface_indexes {
            put_u16(&mut out, index);
        }
        put_u16(&mut out, 0); // fields
        put_u16(&mut out, 0); // methods
        put_u16(&mut out, 0); // attributes
        out
    }

    /// Writes the class under `root` at its package path.
    pub fn write_to(&self, root: &Path) -> PathBuf {
        write_bytes(root, &self.name, &self.bytes())
    }
}

/// Writes arbitrary bytes where the class `fqn` would live under `root`.
pub fn write_bytes(root: &Path, fqn: &str, bytes: &[u8]) -> PathBuf {
    let path = root.join(fqn.replace('.', "/") + ".class");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, bytes).unwrap();
    path
}

#[derive(Default)]
struct Pool {
    bytes: Vec<u8>,
    count: u16,
}

impl Pool {
    fn utf8(&mut self, value: &str) -> u16 {
        self.bytes.push(CONSTANT_UTF8);
        put_u16(&mut self.bytes, value.len() as u16);
        self.bytes.extend_from_slice(value.as_bytes());
        self.count += 1;
        self.count
    }

    /// Adds a Class entry for a dotted name, stored in internal form.
    fn class(&mut self, fqn: &str) -> u16 {
        let name_index = self.utf8(&fqn.replace('.', "/"));
        self.bytes.push(CONSTANT_CLASS);
        put_u16(&mut self.bytes, name_index);
        self.count += 1;
        self.count
    }
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Config over `roots` requesting exactly `roles`, in order.
pub fn config(roots: &[&Path], roles: &[(&str, &str)]) -> svcwire_core::DiscoveryConfig {
    let mut config = svcwire_core::DiscoveryConfig::default();
    config.classpath = roots.iter().map(|r| r.to_path_buf()).collect();
    config.roles.clear();
    config.with_roles(
        roles
            .iter()
            .map(|(name, fqn)| svcwire_core::RoleSpec::new(*name, *fqn)),
    )
}
