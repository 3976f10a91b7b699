use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: png2icns <input.png> <output.icns>";

#[derive(Debug, Parser)]
#[clap(
    name = "png2icns",
    about = "Convert a PNG image into a macOS ICNS icon",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// Path to the source PNG image.
    #[clap(value_name = "INPUT", allow_hyphen_values = true)]
    input: PathBuf,

    /// Path of the ICNS file to create.
    #[clap(value_name = "OUTPUT", allow_hyphen_values = true)]
    output: PathBuf,
}

fn main() -> Result<ExitCode> {
    init_logging()?;

    // Only the two paths are accepted; anything else gets the usage line.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(_) => {
            println!("{USAGE}");
            return Ok(ExitCode::SUCCESS);
        }
    };

    match png2icns::convert(&args.input, &args.output) {
        Ok(()) => {
            println!("ICNS file created at: {}", args.output.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("Error: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

// Diagnostics go to stderr and stay silent unless RUST_LOG asks for them.
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Failed to initialize logging")
}
