use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use observital::config::{self, LoggingConfig};
use observital::service::{CompatibilityRequest, MergeRequest, TransformRequest};
use observital::{Config, Dialect, InMemoryStore, Schema, SchemaService};

/// Observital - transform, merge and compare database schemas
#[derive(Parser)]
#[command(name = "observital")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a schema into another dialect
    Transform {
        /// Schema definition file (.json, .yaml, .yml or .toml)
        schema: PathBuf,

        /// Target dialect, e.g. MySQL, PostgreSQL or MongoDB
        #[arg(short, long)]
        target: String,

        /// Version of the transformed schema
        #[arg(long)]
        target_version: Option<String>,
    },

    /// Merge two or more schemas into one
    Merge {
        /// Schema definition files, merged in the order given
        #[arg(required = true, num_args = 2..)]
        schemas: Vec<PathBuf>,

        /// Name of the merged schema
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Check how compatible a source schema is with a target schema
    Check {
        /// Source schema definition file
        source: PathBuf,

        /// Target schema definition file
        target: PathBuf,
    },

    /// Validate schema definition files
    Validate {
        #[arg(required = true)]
        schemas: Vec<PathBuf>,
    },
}

#[derive(Serialize)]
struct ValidationSummary {
    file: String,
    name: String,
    tables: usize,
    columns: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_from_file(&path.to_string_lossy())
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    if cli.verbose {
        let logging = config.logging.get_or_insert_with(LoggingConfig::default);
        logging.level = "debug".to_string();
        logging.stdout = true;
    }
    observital::utils::init_logging(&config.logging)?;

    let service = SchemaService::new(InMemoryStore::new(), config);

    match cli.command {
        Commands::Transform {
            schema,
            target,
            target_version,
        } => {
            let source = load(&service, &schema)?;
            let transformation = service.transform(TransformRequest {
                schema_id: Some(source.id),
                target_type: Some(Dialect::from(target)),
                target_version,
            })?;
            print_json(&transformation)
        }
        Commands::Merge { schemas, name } => {
            let ids = schemas
                .iter()
                .map(|path| load(&service, path).map(|schema| schema.id))
                .collect::<Result<Vec<_>>>()?;
            let merged = service.merge(MergeRequest {
                schema_ids: Some(ids),
                merged_name: name,
            })?;
            print_json(&merged)
        }
        Commands::Check { source, target } => {
            let source = load(&service, &source)?;
            let target = load(&service, &target)?;
            let report = service.check_compatibility(CompatibilityRequest {
                source_schema_id: Some(source.id),
                target_schema_id: Some(target.id),
            })?;
            print_json(&report)
        }
        Commands::Validate { schemas } => {
            let summaries = schemas
                .iter()
                .map(|path| {
                    load(&service, path).map(|schema| ValidationSummary {
                        file: path.display().to_string(),
                        columns: schema.column_count(),
                        tables: schema.tables.len(),
                        name: schema.name,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            print_json(&summaries)
        }
    }
}

/// Read a definition file and register it with the service
fn load(service: &SchemaService<InMemoryStore>, path: &Path) -> Result<Schema> {
    let request = observital::loader::load_definition(path)
        .with_context(|| format!("Failed to read schema file {}", path.display()))?;

    service
        .create_schema(request)
        .with_context(|| format!("Invalid schema in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
