use std::process;

fn main() {
    if let Err(e) = cmdgen::cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
