//! Discovery configuration: classpath roots, requested roles, output path.
//!
//! Loaded from a JSON file and handed to the discovery run as a value, so
//! nothing in the core reads process-wide state.

use crate::error::{DiscoveryError, Result};
use crate::model::RoleSpec;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "svcwire.json";
pub const DEFAULT_OUTPUT_FILE: &str = "services.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Searched in order; earlier roots shadow later ones.
    pub classpath: Vec<PathBuf>,
    /// Role name -> fully-qualified abstract type, in presentation order.
    pub roles: IndexMap<String, String>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        let roles = [
            ("Parser", "com.framed.communicator.driver.parser.Parser"),
            ("Writer", "com.framed.communicator.io.Writer"),
            ("Protocol", "com.framed.communicator.driver.protocol.Protocol"),
            ("Dispatcher", "com.framed.streamer.dispatcher.Dispatcher"),
        ]
        .into_iter()
        .map(|(name, fqn)| (name.to_string(), fqn.to_string()))
        .collect();

        Self {
            classpath: vec![PathBuf::from("target/classes")],
            roles,
            output: default_output(),
        }
    }
}

impl DiscoveryConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Falls back to [`DiscoveryConfig::default`] when `path` does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(DiscoveryError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content + "\n")?;
        Ok(())
    }

    /// Replaces the classpath when `roots` is non-empty.
    pub fn with_classpath(mut self, roots: Vec<PathBuf>) -> Self {
        if !roots.is_empty() {
            self.classpath = roots;
        }
        self
    }

    /// Adds roles, overriding same-named ones in place.
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = RoleSpec>) -> Self {
        for role in roles {
            self.roles.insert(role.name, role.fqn);
        }
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        if let Some(output) = output {
            self.output = output;
        }
        self
    }

    pub fn role_specs(&self) -> Vec<RoleSpec> {
        self.roles
            .iter()
            .map(|(name, fqn)| RoleSpec::new(name.clone(), fqn.clone()))
            .collect()
    }

    /// Zero roots is the one structurally fatal configuration.
    pub fn validate(&self) -> Result<()> {
        if self.classpath.is_empty() {
            return Err(DiscoveryError::NoClasspathRoots);
        }
        for (name, fqn) in &self.roles {
            if name.trim().is_empty() {
                return Err(DiscoveryError::Config(format!(
                    "role for {fqn} has an empty name"
                )));
            }
            if fqn.trim().is_empty() {
                return Err(DiscoveryError::Config(format!(
                    "role {name} has an empty type name"
                )));
            }
        }
        Ok(())
    }
}
