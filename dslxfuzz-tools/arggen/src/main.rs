//! DSLX Argument Generator Binary
//!
//! Run with: `dslx-arggen [OPTIONS] <TYPE>...`

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dslx_arggen::{generate, parse_types, Config};

#[derive(Parser)]
#[command(name = "dslx-arggen")]
#[command(about = "Generate DSLX fuzz arguments for a list of parameter types")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Parameter types in DSLX syntax, e.g. `u8` or `(uN[4], sN[2][3])`
    #[arg(value_name = "TYPE")]
    types: Vec<String>,

    /// RNG seed (drawn from entropy and logged when omitted)
    #[arg(long, env = "DSLX_ARGGEN_SEED")]
    seed: Option<u64>,

    /// Number of argument batches to generate
    #[arg(long)]
    calls_per_sample: Option<usize>,

    /// Also print generated codegen flags
    #[arg(long)]
    codegen: bool,

    /// Use the plain Verilog dialect flag
    #[arg(long)]
    no_system_verilog: bool,

    /// Configuration file path
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Some(Commands::Config) = &cli.command {
        println!("{}", serde_json::to_string_pretty(&Config::default())?);
        return Ok(());
    }

    if cli.types.is_empty() {
        bail!("no parameter types given");
    }

    let config = build_config(&cli)?;
    let types = parse_types(&cli.types)?;
    debug!("Parsed {} parameter type(s)", types.len());

    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            info!("Using seed {}", seed);
            seed
        }
    };

    let report = generate(&types, &config, seed)
        .with_context(|| format!("Failed to generate arguments (seed {})", seed))?;
    print!("{}", report);

    Ok(())
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?
    } else {
        Config::default()
    };

    // Override with CLI options
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(calls) = cli.calls_per_sample {
        config.calls_per_sample = calls;
    }
    if cli.codegen {
        config.codegen = true;
    }
    if cli.no_system_verilog {
        config.use_system_verilog = false;
    }

    Ok(config)
}
