use std::path::Path;
use svcwire_core::{DiscoveryConfig, DiscoveryError};
use tracing::info;

pub fn run(output: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    write_default(output, force)?;
    info!("Wrote default configuration to {}", output.display());
    Ok(())
}

fn write_default(output: &Path, force: bool) -> svcwire_core::Result<()> {
    if output.exists() && !force {
        return Err(DiscoveryError::Config(format!(
            "{} already exists, pass --force to overwrite",
            output.display()
        )));
    }
    DiscoveryConfig::default().save(output)
}
