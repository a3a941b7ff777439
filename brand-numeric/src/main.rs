//! brand-numeric Binary
//!
//! Run with: `brand-numeric [OPTIONS] <COMMAND>`

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use brand_dispatch::{DispatchConfig, ResolutionPolicy};
use brand_numeric::{describe, read_config, Calculator};

#[derive(Parser)]
#[command(name = "brand-numeric")]
#[command(about = "Width-preserving arithmetic on branded numbers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (JSON)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Override the resolution policy from the configuration
    #[arg(long, value_enum, global = true)]
    policy: Option<PolicyArg>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an operation, e.g. `eval add 100:i8 27:i8`
    Eval {
        /// Operation name (add, sub, mul, div, neg)
        op: String,
        /// First operand as `<value>:<kind>`
        #[arg(allow_hyphen_values = true)]
        lhs: String,
        /// Second operand, omitted for unary operations
        #[arg(allow_hyphen_values = true)]
        rhs: Option<String>,
    },
    /// List operations and the patterns they accept
    Table,
    /// Print the default configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Strict,
    MostSpecific,
}

impl From<PolicyArg> for ResolutionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Strict => ResolutionPolicy::Strict,
            PolicyArg::MostSpecific => ResolutionPolicy::MostSpecific,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match &cli.command {
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&DispatchConfig::default())?);
        }
        Commands::Eval { op, lhs, rhs } => {
            let calc = build_calculator(&cli)?;
            let mut operands = vec![lhs.as_str()];
            operands.extend(rhs.as_deref());
            let result = calc
                .eval_str(op, &operands)
                .with_context(|| format!("Failed to evaluate `{} {}`", op, operands.join(" ")))?;
            println!("{}", result);
        }
        Commands::Table => {
            let calc = build_calculator(&cli)?;
            for (name, patterns) in describe(calc.context()) {
                println!("{}", name);
                for pattern in patterns {
                    println!("    {}", pattern);
                }
            }
        }
    }

    Ok(())
}

fn build_calculator(cli: &Cli) -> Result<Calculator> {
    let config = build_config(cli)?;
    debug!(?config, "dispatch configuration");
    Calculator::with_config(config).context("Failed to build arithmetic context")
}

fn build_config(cli: &Cli) -> Result<DispatchConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            read_config(path)?
        }
        None => DispatchConfig::default(),
    };

    if let Some(policy) = cli.policy {
        config.policy = policy.into();
    }

    Ok(config)
}
