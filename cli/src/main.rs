#![deny(missing_docs)]

//! # Clientgen CLI
//!
//! Command line front end: reads an OpenAPI 3.0 document and writes
//! `types.rs` and `client.rs` into the output directory.

use clap::Parser;
use openapi_clientgen::{generate, GenerateOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{CliError, CliResult};

mod error;

/// Generate Rust types and a typed HTTP client from an OpenAPI 3.0 document.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Cli {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(short, long, env = "CLIENTGEN_SPEC", default_value = "openapi.yaml")]
    spec: PathBuf,

    /// Directory receiving `types.rs` and `client.rs`.
    #[clap(short, long, env = "CLIENTGEN_OUTPUT", default_value = ".")]
    output: PathBuf,

    /// Module the generated files live in; the client imports `crate::<module>::types::*`.
    #[clap(short, long, env = "CLIENTGEN_MODULE", default_value = "api")]
    module: String,

    /// Handlebars template replacing the built-in client template.
    #[clap(long, env = "CLIENTGEN_CLIENT_TEMPLATE")]
    client_template: Option<PathBuf>,

    /// Handlebars template replacing the built-in types template.
    #[clap(long, env = "CLIENTGEN_TYPES_TEMPLATE")]
    types_template: Option<PathBuf>,

    /// Write the rendered text as is, without validating and reformatting it.
    #[clap(long)]
    no_format: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins when set.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            module: self.module.clone(),
            client_template: self.client_template.clone(),
            types_template: self.types_template.clone(),
            format: !self.no_format,
        }
    }
}

fn init_tracing(verbose: u8) -> CliResult<()> {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        },
    };
    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

fn run(cli: &Cli) -> CliResult<()> {
    let files = generate(&cli.spec, &cli.output, &cli.options())?;
    println!(
        "Generated {} types and {} operations: {}, {}",
        files.type_count,
        files.operation_count,
        files.types.display(),
        files.client.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match init_tracing(cli.verbose).and_then(|()| run(&cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_map_to_options() {
        let cli = Cli::try_parse_from([
            "openapi-clientgen",
            "-s",
            "spec.json",
            "-o",
            "out",
            "-m",
            "vrchat",
            "--client-template",
            "client.hbs",
            "--no-format",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.spec, PathBuf::from("spec.json"));
        assert_eq!(cli.output, PathBuf::from("out"));
        assert_eq!(cli.verbose, 2);

        let options = cli.options();
        assert_eq!(options.module, "vrchat");
        assert_eq!(options.client_template, Some(PathBuf::from("client.hbs")));
        assert_eq!(options.types_template, None);
        assert!(!options.format);
    }

    #[test]
    fn test_run_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "openapi-clientgen",
            "--spec",
            dir.path().join("missing.yaml").to_str().unwrap(),
            "--output",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
    }
}
