fn main() {
    if let Err(e) = svcwire_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
