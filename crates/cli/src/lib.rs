pub mod emit;
mod init;
mod list;
mod scan;
mod view;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use svcwire_core::config::DEFAULT_CONFIG_FILE;
use svcwire_core::{DiscoveryConfig, RoleSpec};

#[derive(Parser)]
#[command(
    name = "svcwire",
    version,
    about = "Discover service implementations in compiled classes and emit wiring config",
    long_about = "svcwire scans directories of compiled class files, works out which concrete \
                  types implement each configured role by walking their supertypes, and writes \
                  the selected implementation per role as a service configuration file. \
                  No project code is loaded or executed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Where to write the configuration
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List every class found on the classpath
    Scan {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show the implementations found for each role
    #[command(
        long_about = "Indexes the classpath against the configured roles and prints, per role, \
                      every type whose supertype closure contains the role type. Roles with no \
                      implementation are listed as empty. Warnings go to stderr."
    )]
    List {
        #[command(flatten)]
        source: SourceArgs,
        /// Hide interfaces, abstract classes, enums and annotations
        #[arg(long)]
        concrete_only: bool,
        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Choose one implementation per role and write the service file
    #[command(
        long_about = "Resolves exactly one implementation per role. A role with a single \
                      instantiable candidate is chosen automatically; otherwise pick one \
                      with --select ROLE=FQN. Interfaces and abstract classes are never \
                      written. The result is written as JSON keyed by role name."
    )]
    Emit {
        #[command(flatten)]
        source: SourceArgs,
        /// Pick the implementation for a role, e.g. Parser=com.example.JsonParser
        #[arg(long = "select", value_name = "ROLE=FQN")]
        selections: Vec<RoleSpec>,
        /// Output path, overriding the configuration
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Where to find the configuration, and command-line overrides on top of it.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Configuration file; defaults apply when it does not exist
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Classpath root, repeatable; replaces the configured classpath
    #[arg(long = "classpath", value_name = "DIR")]
    pub classpath: Vec<PathBuf>,
    /// Add or override a role, repeatable
    #[arg(long = "role", value_name = "NAME=FQN")]
    pub roles: Vec<RoleSpec>,
}

impl SourceArgs {
    pub fn load(&self) -> svcwire_core::Result<DiscoveryConfig> {
        let config = DiscoveryConfig::load_or_default(&self.config)?
            .with_classpath(self.classpath.clone())
            .with_roles(self.roles.iter().cloned());
        config.validate()?;
        Ok(config)
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _guard = svcwire_core::logging::init_logging("cli", true);

    match cli.command {
        Commands::Init { output, force } => init::run(&output, force),
        Commands::Scan { source } => scan::run(&source),
        Commands::List {
            source,
            concrete_only,
            json,
        } => list::run(&source, concrete_only, json),
        Commands::Emit {
            source,
            selections,
            output,
        } => emit::run(&source, &selections, output),
    }
}
