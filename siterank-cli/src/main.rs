//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use clap::Parser;

#[expect(
    clippy::print_stderr,
    reason = "top-level error reporting writes to stderr"
)]
fn main() {
    let cli = siterank_cli::Cli::parse();
    if let Err(err) = siterank_cli::run(&cli) {
        eprintln!("siterank: {err:#}");
        std::process::exit(1);
    }
}
