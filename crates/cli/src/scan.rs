use crate::SourceArgs;
use crate::view::{self, ClassRow};
use svcwire_java::JavaDiscovery;
use tabled::{Table, settings::Style};

pub fn run(source: &SourceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let discovery = JavaDiscovery::new(source.load()?)?;
    let (classes, warnings) = discovery.scan();

    view::print_warnings(&warnings);

    if classes.is_empty() {
        println!("No classes found.");
        return Ok(());
    }

    let rows: Vec<ClassRow> = classes.iter().map(ClassRow::from_class).collect();
    println!("{}", Table::new(rows).with(Style::psql()));
    println!("{} classes", classes.len());
    Ok(())
}
