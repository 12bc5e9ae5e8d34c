use crate::SourceArgs;
use crate::view::{self, ImplementationRow};
use svcwire_core::DiscoveryReport;
use svcwire_java::JavaDiscovery;
use tabled::{Table, settings::Style};

pub fn run(
    source: &SourceArgs,
    concrete_only: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let discovery = JavaDiscovery::new(source.load()?)?;
    let mut report = discovery.run();
    if concrete_only {
        report = report.instantiable_only();
    }

    view::print_warnings(&report.warnings);

    if json {
        println!("{}", serde_json::to_string_pretty(&report.implementations)?);
    } else {
        println!("{}", Table::new(rows(&report)).with(Style::psql()));
    }
    Ok(())
}

fn rows(report: &DiscoveryReport) -> Vec<ImplementationRow> {
    report
        .implementations
        .iter()
        .flat_map(|(role, set)| {
            if set.is_empty() {
                vec![ImplementationRow::empty(role)]
            } else {
                set.iter()
                    .map(|m| ImplementationRow::from_implementation(role, m))
                    .collect()
            }
        })
        .collect()
}
