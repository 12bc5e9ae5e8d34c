use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("classpath root not found: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("classpath root unreadable: {}: {reason}", .path.display())]
    RootUnreadable { path: PathBuf, reason: String },
    #[error("malformed type {fqn} at {}: {reason}", .path.display())]
    MalformedType {
        fqn: String,
        path: PathBuf,
        reason: String,
    },
    #[error("type not found on classpath: {0}")]
    TypeNotFound(String),
    #[error("role {role} names {fqn}, which is not on the classpath")]
    RoleTypeNotFound { role: String, fqn: String },
    #[error("no classpath roots configured")]
    NoClasspathRoots,
    #[error("configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiscoveryError {
    /// Whether this error aborts a discovery run rather than being recorded
    /// as a warning against a single root, role or candidate.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DiscoveryError::NoClasspathRoots
                | DiscoveryError::Config(_)
                | DiscoveryError::Io(_)
                | DiscoveryError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
