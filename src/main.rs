//! Kodegen Bundler Ninja - lowers bundle targets to ninja build statements.
//!
//! This binary reads a bundle manifest and writes the copy, asset catalog,
//! code-signing and stamp statements of every bundle target.

use kodegen_bundler_ninja::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging (RUST_LOG controls verbosity)
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
