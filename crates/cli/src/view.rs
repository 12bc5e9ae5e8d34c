use nu_ansi_term::Color;
use svcwire_core::{ClassRef, DiscoveryError, Implementation};
use tabled::Tabled;

#[derive(Tabled)]
pub struct ClassRow {
    #[tabled(rename = "Class")]
    pub class: String,
    #[tabled(rename = "Location")]
    pub location: String,
}

impl ClassRow {
    pub fn from_class(class: &ClassRef) -> Self {
        Self {
            class: class.fqn.clone(),
            location: class.path.display().to_string(),
        }
    }
}

/// One row per (role, implementation); an empty role gets a single `-` row.
#[derive(Tabled)]
pub struct ImplementationRow {
    #[tabled(rename = "Role")]
    pub role: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Implementation")]
    pub fqn: String,
    #[tabled(rename = "Location")]
    pub location: String,
}

impl ImplementationRow {
    pub fn from_implementation(role: &str, implementation: &Implementation) -> Self {
        let location = implementation
            .class
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("-")
            .to_string();

        Self {
            role: role.to_string(),
            kind: implementation.kind.to_string(),
            fqn: implementation.fqn().to_string(),
            location,
        }
    }

    pub fn empty(role: &str) -> Self {
        Self {
            role: role.to_string(),
            kind: "-".to_string(),
            fqn: "(none)".to_string(),
            location: "-".to_string(),
        }
    }
}

pub fn print_warnings(warnings: &[DiscoveryError]) {
    if warnings.is_empty() {
        return;
    }
    let label = Color::Yellow.bold().paint("warning");
    for warning in warnings {
        eprintln!("{}: {}", label, warning);
    }
}
