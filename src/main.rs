//! wrapchain - run JSON documents through an ordered transformer chain.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use wrapchain::{cli::Cli, registry::TransformerRegistry, setup_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_tracing(&cli.log_level, cli.log_format.as_deref()) {
        eprintln!("Failed to setup tracing: {e}");
        return ExitCode::FAILURE;
    }

    let registry = TransformerRegistry::new();
    match cli.execute(&registry, &mut io::stdin().lock(), &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "wrapchain failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
