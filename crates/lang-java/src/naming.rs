//! Conversions between class-file paths and binary type names.

use std::path::{Component, Path, PathBuf};

/// Separator between packages and between package/class.
pub const TYPE_SEPARATOR: char = '.';

/// Separator used inside the class file format (`com/example/Foo`).
pub const INTERNAL_SEPARATOR: char = '/';

pub const CLASS_EXTENSION: &str = "class";

/// Whether `segment` is a legal JVM identifier as javac would emit it.
///
/// This rejects `module-info`, `package-info` and directories such as
/// `META-INF` that never hold loadable classes.
pub fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// `com/example/Foo.class` under `root` becomes `com.example.Foo`.
///
/// Returns `None` for anything that is not a loadable class artifact.
pub fn fqn_from_path(root: &Path, path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some(CLASS_EXTENSION) {
        return None;
    }
    let relative = path.strip_prefix(root).ok()?.with_extension("");

    let mut segments = Vec::new();
    for component in relative.components() {
        let Component::Normal(part) = component else {
            return None;
        };
        let part = part.to_str()?;
        if !is_identifier(part) {
            return None;
        }
        segments.push(part);
    }

    if segments.is_empty() {
        return None;
    }
    Some(segments.join("."))
}

/// Inverse of [`fqn_from_path`]: `com.example.Foo` becomes `com/example/Foo.class`.
pub fn relative_path_for(fqn: &str) -> Option<PathBuf> {
    let mut path = PathBuf::new();
    for segment in fqn.split(TYPE_SEPARATOR) {
        if !is_identifier(segment) {
            return None;
        }
        path.push(segment);
    }
    path.set_extension(CLASS_EXTENSION);
    Some(path)
}

/// `com/example/Foo` (constant pool form) becomes `com.example.Foo`.
pub fn from_internal(name: &str) -> String {
    name.replace(INTERNAL_SEPARATOR, &TYPE_SEPARATOR.to_string())
}
