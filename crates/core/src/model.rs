//! Data model shared by the scanner, the introspector and the index.

use crate::error::{DiscoveryError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A class artifact found on the classpath.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassRef {
    /// Binary name, e.g. `com.example.Outer$Inner`.
    pub fqn: String,
    pub path: PathBuf,
}

impl ClassRef {
    pub fn new(fqn: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            fqn: fqn.into(),
            path: path.into(),
        }
    }

    pub fn simple_name(&self) -> &str {
        self.fqn.rsplit('.').next().unwrap_or(&self.fqn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    AbstractClass,
    Interface,
    Enum,
    Annotation,
}

impl TypeKind {
    /// Only plain concrete classes can be instantiated by name downstream.
    pub fn is_instantiable(self) -> bool {
        matches!(self, TypeKind::Class)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeKind::Class => "class",
            TypeKind::AbstractClass => "abstract class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Annotation => "annotation",
        };
        f.write_str(s)
    }
}

/// Direct supertype edges of one type, names unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub fqn: String,
    pub kind: TypeKind,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
}

impl TypeDescriptor {
    /// Superclass first, then interfaces in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.super_class
            .as_deref()
            .into_iter()
            .chain(self.interfaces.iter().map(String::as_str))
    }
}

/// A named role and the abstract type that defines it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleSpec {
    pub name: String,
    pub fqn: String,
}

impl RoleSpec {
    pub fn new(name: impl Into<String>, fqn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fqn: fqn.into(),
        }
    }
}

/// Parses `Name=fully.qualified.Type`.
impl FromStr for RoleSpec {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, fqn) = parse_assignment(s)?;
        Ok(Self { name, fqn })
    }
}

/// Splits a `KEY=VALUE` command-line assignment, rejecting empty halves.
pub fn parse_assignment(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| DiscoveryError::Config(format!("expected KEY=VALUE, got '{s}'")))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return Err(DiscoveryError::Config(format!(
            "expected KEY=VALUE, got '{s}'"
        )));
    }
    Ok((key.to_string(), value.to_string()))
}

/// A type that satisfies a role, with its kind for caller-side filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Implementation {
    #[serde(flatten)]
    pub class: ClassRef,
    pub kind: TypeKind,
}

impl Implementation {
    pub fn fqn(&self) -> &str {
        &self.class.fqn
    }
}

/// Implementations of one role in discovery order.
///
/// Built once per run and never mutated; filtering produces a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplementationSet {
    members: Vec<Implementation>,
}

impl ImplementationSet {
    pub fn new(members: Vec<Implementation>) -> Self {
        Self { members }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Implementation> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, fqn: &str) -> Option<&Implementation> {
        self.members.iter().find(|m| m.class.fqn == fqn)
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.get(fqn).is_some()
    }

    pub fn fqns(&self) -> Vec<&str> {
        self.members.iter().map(Implementation::fqn).collect()
    }

    pub fn filtered(&self, mut keep: impl FnMut(&Implementation) -> bool) -> Self {
        Self {
            members: self.members.iter().filter(|m| keep(m)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ImplementationSet {
    type Item = &'a Implementation;
    type IntoIter = std::slice::Iter<'a, Implementation>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Outcome of one discovery run: every requested role, in request order,
/// plus the non-fatal problems met on the way.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub implementations: IndexMap<String, ImplementationSet>,
    pub warnings: Vec<DiscoveryError>,
}

impl DiscoveryReport {
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.implementations.keys().map(String::as_str)
    }

    pub fn get(&self, role: &str) -> Option<&ImplementationSet> {
        self.implementations.get(role)
    }

    /// Drops interfaces, abstract classes, enums and annotations from every set.
    pub fn instantiable_only(mut self) -> Self {
        self.implementations = self
            .implementations
            .iter()
            .map(|(role, set)| (role.clone(), set.filtered(|m| m.kind.is_instantiable())))
            .collect();
        self
    }
}
