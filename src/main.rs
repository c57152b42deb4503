fn main() {
    if let Err(error) = objdist::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
