#![deny(missing_docs)]

//! # P2O CLI
//!
//! Command Line Interface for the Postman -> OpenAPI translator.
//!
//! Supported Commands:
//! - `convert`: Reads a collection JSON file and writes the OpenAPI document.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod convert;
mod error;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Postman Collection -> OpenAPI 3.0 converter")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a Postman collection export into an OpenAPI document.
    Convert(convert::ConvertArgs),
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Convert(args) => convert::execute(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
