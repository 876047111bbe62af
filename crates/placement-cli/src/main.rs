//! Placement CLI - replay instance/region selections against a catalog
//!
//! Provides commands for:
//! - Viewing the selection derived from a stored state
//! - Applying a sequence of user actions
//! - Checking a stored state against the selection invariants
//! - Evaluating the credit-card prompt for an organization
//!
//! Binary: placement
//!
//! ```bash
//! placement --catalog catalog.json apply category=gpu region=na --out state.json
//! placement --catalog catalog.json --state state.json check
//! placement --catalog catalog.json --organization org.json billing --instance gpu-1
//! ```

use clap::{Parser, Subcommand};
use placement_engine::{SelectionConfig, SelectionEngine};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Step;

/// Placement CLI - instance and region selection
#[derive(Parser)]
#[command(name = "placement")]
#[command(about = "Derive valid instance and region selections from a catalog", long_about = None)]
struct Cli {
    /// Catalog snapshot (JSON)
    #[arg(long, global = true, env = "PLACEMENT_CATALOG")]
    catalog: Option<PathBuf>,

    /// Selection state (JSON, default: empty selection)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Organization entitlements (JSON), used to derive availabilities
    #[arg(long, global = true)]
    organization: Option<PathBuf>,

    /// Force single-region mode
    #[arg(long, global = true)]
    single_region: bool,

    /// Preferred default regions, most preferred first (e.g. fra,par)
    #[arg(long, global = true, value_delimiter = ',')]
    prefer: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the view of the current selection
    View,

    /// Apply steps in order and print the resulting view
    Apply {
        /// Steps: category=<c>, scope=<s>, instance=<id>, region=<id>
        #[arg(required = true)]
        steps: Vec<Step>,

        /// Write the resulting state to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Check the stored selection against the selection invariants
    Check,

    /// Show whether the organization must add a credit card for an instance
    Billing {
        /// Instance id
        #[arg(long)]
        instance: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the JSON output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "placement=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = SelectionConfig::from_env()?;
    if cli.single_region {
        config = config.with_single_region(true);
    }
    if !cli.prefer.is_empty() {
        config = config.with_preferred_regions(cli.prefer.iter().cloned());
    }
    debug!(?config, "Selection configuration");

    let catalog_path = cli
        .catalog
        .ok_or_else(|| anyhow::anyhow!("--catalog or PLACEMENT_CATALOG required"))?;
    let organization = cli
        .organization
        .as_deref()
        .map(commands::load_organization)
        .transpose()?;
    let catalog = commands::load_catalog(&catalog_path, &config, organization.as_ref())?;
    info!(
        instances = catalog.instances.len(),
        regions = catalog.regions.len(),
        "Loaded catalog {}", catalog_path.display()
    );

    let engine = SelectionEngine::new(&catalog, config.resolver());
    let state = commands::load_state(cli.state.as_deref())?;

    match cli.command {
        Commands::View => {
            println!("{}", commands::view(&engine, &state)?);
        }
        Commands::Apply { steps, out } => {
            let state = commands::apply(&engine, state, &steps)?;
            if let Some(out) = out {
                commands::save_state(&out, &state)?;
            }
            println!("{}", serde_json::to_string_pretty(&engine.view(&state))?);
        }
        Commands::Check => {
            commands::check(&engine, &state)?;
        }
        Commands::Billing { instance } => {
            let organization = organization
                .ok_or_else(|| anyhow::anyhow!("--organization required for billing"))?;
            let report = commands::billing(&catalog, &organization, &instance)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
