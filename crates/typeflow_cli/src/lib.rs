//! Command-line interface for the typeflow build steps.
//!
//! # Usage
//!
//! ```bash
//! # Validate a published schema artifact
//! typeflow check schema.graphql
//!
//! # Generate typed operations from the artifact and operation documents
//! typeflow codegen schema.graphql --operations operations.graphql --output src/generated.rs
//! ```
//!
//! Artifact and generation failures are build-step failures: they print a
//! message and exit non-zero, and are never retried.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use typeflow_codegen::{generate, CodegenOptions};

#[derive(Parser, Debug)]
#[command(name = "typeflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse and validate a schema artifact
    Check {
        /// Artifact file path
        schema: PathBuf,
    },

    /// Generate typed operations from an artifact
    Codegen {
        /// Artifact file path
        schema: PathBuf,

        /// Operation document files (one or more)
        #[arg(short = 'p', long = "operations", required = true)]
        operations: Vec<PathBuf>,

        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Crate path the generated code imports the SDK from
        #[arg(long, default_value = "typeflow_sdk")]
        sdk_crate: String,
    },

    /// Print version information
    Version,
}

pub fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Check { schema } => check_schema(&schema, cli.verbose),
        Commands::Codegen {
            schema,
            operations,
            output,
            sdk_crate,
        } => generate_code(&schema, &operations, output.as_ref(), sdk_crate),
        Commands::Version => {
            println!("typeflow {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    }
}

fn check_schema(path: &Path, verbose: bool) -> Result<i32, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;

    match typeflow_syntax::parse_schema(&source) {
        Ok(schema) => {
            if verbose {
                for name in schema.types.keys() {
                    println!("  {} {}", "type".blue(), name);
                }
            }
            println!(
                "{} {} ({} types, {} queries, {} mutations)",
                "OK".green().bold(),
                path.display(),
                schema.types.len(),
                schema.query.len(),
                schema.mutation.len()
            );
            Ok(0)
        }
        Err(e) => {
            eprintln!("{} {}", "Error".red().bold(), path.display());
            eprintln!("  {e}");
            Ok(1)
        }
    }
}

fn generate_code(
    schema_path: &Path,
    operation_paths: &[PathBuf],
    output: Option<&PathBuf>,
    sdk_crate: String,
) -> Result<i32, Box<dyn std::error::Error>> {
    let sdl = std::fs::read_to_string(schema_path)?;

    let mut sources = Vec::new();
    for path in operation_paths {
        sources.push(std::fs::read_to_string(path)?);
    }
    let source_refs: Vec<&str> = sources.iter().map(String::as_str).collect();

    let options = CodegenOptions {
        sdk_crate,
        ..Default::default()
    };
    let code = match generate(&sdl, &source_refs, &options) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e}", "Error".red().bold());
            return Ok(1);
        }
    };

    match output {
        Some(path) => {
            std::fs::write(path, &code)?;
            println!("{} {}", "Generated".green(), path.display());
        }
        None => println!("{code}"),
    }

    Ok(0)
}
