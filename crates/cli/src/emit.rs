//! Per-role selection and the service file handed to the runtime loader.

use crate::SourceArgs;
use crate::view;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use svcwire_core::{DiscoveryError, DiscoveryReport, Result, RoleSpec};
use svcwire_java::JavaDiscovery;
use tracing::info;

/// One service entry; the loader requires both fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEntry {
    pub class: String,
    pub id: String,
}

pub type ServiceFile = IndexMap<String, Vec<ServiceEntry>>;

pub fn run(
    source: &SourceArgs,
    selections: &[RoleSpec],
    output: Option<PathBuf>,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = source.load()?.with_output(output);
    let output = config.output.clone();
    let discovery = JavaDiscovery::new(config)?;

    let report = discovery.run();
    view::print_warnings(&report.warnings);

    let chosen = resolve(&report, selections)?;
    write(&output, &service_file(&chosen))?;

    info!("Wrote {} services to {}", chosen.len(), output.display());
    Ok(())
}

/// Picks one instantiable implementation per role, in role order.
///
/// The loader creates services by class name, so interfaces, abstract
/// classes, enums and annotations are never candidates. An explicit
/// selection must name an instantiable member of its role's set. Without
/// one, a role resolves only when it has exactly one candidate.
pub fn resolve(
    report: &DiscoveryReport,
    selections: &[RoleSpec],
) -> Result<IndexMap<String, String>> {
    for selection in selections {
        if report.get(&selection.name).is_none() {
            return Err(DiscoveryError::Config(format!(
                "--select names unknown role {}",
                selection.name
            )));
        }
    }

    let mut chosen = IndexMap::new();
    for (role, set) in &report.implementations {
        let instantiable = set.filtered(|m| m.kind.is_instantiable());
        // Last --select for a role wins, matching how --role overrides apply.
        let selected = selections.iter().rev().find(|s| &s.name == role);

        let fqn = match selected {
            Some(selection) if instantiable.contains(&selection.fqn) => {
                selection.fqn.clone()
            }
            Some(selection) => {
                let reason = match set.get(&selection.fqn) {
                    Some(member) => {
                        format!("{} ({}) cannot be instantiated", selection.fqn, member.kind)
                    }
                    None => format!("{} is not an implementation of {}", selection.fqn, role),
                };
                return Err(DiscoveryError::Config(format!(
                    "{reason}; candidates: {}",
                    candidates(instantiable.fqns())
                )));
            }
            None if instantiable.len() == 1 => instantiable.fqns()[0].to_string(),
            None if instantiable.is_empty() => {
                return Err(DiscoveryError::Config(format!(
                    "no instantiable implementation found for role {role}"
                )));
            }
            None => {
                return Err(DiscoveryError::Config(format!(
                    "role {role} has {} candidates, choose one with --select {role}=FQN: {}",
                    instantiable.len(),
                    candidates(instantiable.fqns())
                )));
            }
        };
        chosen.insert(role.clone(), fqn);
    }
    Ok(chosen)
}

fn candidates(fqns: Vec<&str>) -> String {
    fqns.join(", ")
}

pub fn service_file(chosen: &IndexMap<String, String>) -> ServiceFile {
    chosen
        .iter()
        .map(|(role, fqn)| {
            let entry = ServiceEntry {
                class: fqn.clone(),
                id: role.to_lowercase(),
            };
            (role.clone(), vec![entry])
        })
        .collect()
}

fn write(path: &Path, file: &ServiceFile) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(file)?;
    std::fs::write(path, content + "\n")?;
    Ok(())
}
