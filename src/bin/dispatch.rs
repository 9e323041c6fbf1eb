//! Type Dispatch CLI
//!
//! Runs entities and loosely typed values through the dispatcher and prints
//! what each operation concludes.

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use type_dispatch::entity::load_entities;
use type_dispatch::value::load_values;
use type_dispatch::{DispatchConfig, DispatchReport, DynValue, OutputFormat, TypeDispatcher};

#[derive(Parser)]
#[command(name = "type-dispatch")]
#[command(about = "Classify, downcast and dispatch over the animal hierarchy")]
struct Cli {
    /// Config file (defaults to dispatch.toml lookup)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format, overriding the config
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the configured sample scenario
    Demo,

    /// Report the most specific type of each entity in a JSON file
    Classify {
        /// JSON array of tagged entities
        file: PathBuf,
    },

    /// Downcast each entity in a JSON file to its richest view
    Downcast {
        /// JSON array of tagged entities
        file: PathBuf,
    },

    /// Dispatch loosely typed values
    Any {
        /// Values as JSON (non-JSON arguments are taken as strings)
        values: Vec<String>,

        /// Read a JSON array of values from a file instead
        #[arg(long, conflicts_with = "values")]
        file: Option<PathBuf>,
    },

    /// Write the default configuration
    InitConfig {
        #[arg(default_value = "dispatch.toml")]
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = DispatchConfig::load_from(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.output.format);
    let dispatcher = TypeDispatcher::new();

    match cli.command {
        Commands::Demo => {
            let values = config.demo.dyn_values();
            let report = DispatchReport::build(&dispatcher, &config.demo.entities, &values);
            print!("{}", report.render(format)?);
        }

        Commands::Classify { file } => {
            let entities = load_entities(&file)?;
            let report = DispatchReport::build(&dispatcher, &entities, &[]);
            match format {
                OutputFormat::Text => {
                    for entity in &report.entities {
                        println!("{}", entity.type_check);
                    }
                }
                _ => println!("{}", report.render(format)?),
            }
        }

        Commands::Downcast { file } => {
            let entities = load_entities(&file)?;
            let report = DispatchReport::build(&dispatcher, &entities, &[]);
            match format {
                OutputFormat::Text => {
                    for entity in &report.entities {
                        println!("{}", entity.downcast);
                    }
                }
                _ => println!("{}", report.render(format)?),
            }
        }

        Commands::Any { values, file } => {
            let values: Vec<DynValue> = match file {
                Some(path) => load_values(&path)?,
                None => values.iter().map(|arg| DynValue::from_arg(arg)).collect(),
            };
            let report = DispatchReport::build(&dispatcher, &[], &values);
            match format {
                OutputFormat::Text => {
                    for value in &report.values {
                        println!("{}", value.message);
                    }
                }
                _ => println!("{}", report.render(format)?),
            }
        }

        Commands::InitConfig { path } => {
            DispatchConfig::default().save(&path)?;
            println!("✅ Wrote config to: {:?}", path);
        }
    }

    Ok(())
}
