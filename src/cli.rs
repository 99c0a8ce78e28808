//! Command-line interface

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::registry::TransformerRegistry;

/// Run JSON documents through an ordered transformer chain
#[derive(Parser, Debug)]
#[command(name = "wrapchain")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, env = "WRAPCHAIN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        default_value = "warn",
        env = "WRAPCHAIN_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, env = "WRAPCHAIN_LOG_FORMAT", global = true)]
    pub log_format: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply the configured chain to a JSON document
    Apply {
        /// Input JSON file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pretty-print the result
        #[arg(long)]
        pretty: bool,
    },

    /// Validate the configuration and show the resulting chain
    Check {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = CheckFormat::Names)]
        format: CheckFormat,
    },
}

/// Output of `wrapchain check`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckFormat {
    /// One transformer name per line, in application order
    Names,
    /// The effective configuration as YAML
    Yaml,
}

impl Cli {
    /// Run the parsed command against `registry`.
    ///
    /// `stdin` is read only by `apply` without `--input`; results go to
    /// `stdout`. Any error here means a non-zero exit for the binary,
    /// including a transformer rejecting the document.
    pub fn execute(
        &self,
        registry: &TransformerRegistry,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let config = Config::load(self.config.as_deref()).context("loading configuration")?;
        let chain = config
            .build_chain(registry)
            .with_context(|| format!("building chain '{}'", config.name))?;

        match &self.command {
            Command::Apply { input, pretty } => {
                let document = read_document(input.as_deref(), stdin)?;
                debug!(chain = %config.name, transformers = chain.len(), "Applying chain");
                let output = chain
                    .wrap(document)
                    .with_context(|| format!("applying chain '{}'", config.name))?;
                if *pretty {
                    serde_json::to_writer_pretty(&mut *stdout, &output)?;
                } else {
                    serde_json::to_writer(&mut *stdout, &output)?;
                }
                writeln!(stdout)?;
            }
            Command::Check { format } => match format {
                CheckFormat::Names => {
                    for name in chain.names() {
                        writeln!(stdout, "{name}")?;
                    }
                }
                CheckFormat::Yaml => write!(stdout, "{}", config.to_yaml()?)?,
            },
        }
        Ok(())
    }
}

fn read_document(input: Option<&Path>, stdin: &mut dyn Read) -> anyhow::Result<Value> {
    let raw = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading input file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("parsing input JSON")
}
