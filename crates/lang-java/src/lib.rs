pub mod classfile;
pub mod discovery;
pub mod naming;
pub mod scanner;

pub use classfile::ClassFileSource;
pub use discovery::JavaDiscovery;
pub use scanner::{ClassPathScanner, ClassScan};
