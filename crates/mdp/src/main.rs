//! mdp - Markdown preview.
//!
//! Renders a Markdown file into a standalone, sanitized HTML page, writes it to
//! a fresh `mdp*.html` file, prints that file's path on stdout, and opens it in
//! the default viewer unless `--skip-preview` is given.

mod commands;
mod error;
mod output;
mod preview;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::RenderArgs;
use output::Output;

/// mdp - Markdown preview.
#[derive(Parser)]
#[command(name = "mdp", version, about)]
struct Cli {
    #[command(flatten)]
    render: RenderArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.render.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // stdout carries the generated page path, keep logs off it
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    if let Err(err) = cli.render.execute(&mut stdout.lock()) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
