//! Caravel CLI - prepare hybrid mobile projects for native builds

fn main() {
    if let Err(e) = caravel::cli::run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
