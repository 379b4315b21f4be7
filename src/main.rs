//! storectl: connection and listing reports for storage server fan-outs.
//!
//! Usage:
//!   storectl conns --snapshot results.json
//!   storectl --json list --snapshot nvme.json
//!   storectl conns --hostlist node1,node2:10001 --snapshot results.json

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use storectl::config::Config;
use storectl::{AddressSet, ConnectionSummary, Snapshot};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "storectl", version)]
#[command(about = "Storage server connection and listing reports", long_about = None)]
struct Cli {
    /// Path to storectl.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize which storage servers answered
    Conns {
        /// JSON results written by the RPC fan-out
        #[arg(long)]
        snapshot: PathBuf,

        /// Comma separated storage servers, overriding the snapshot and configured hostlist
        #[arg(short = 'l', long)]
        hostlist: Option<String>,
    },
    /// List the items each storage server returned
    List {
        /// JSON results written by the RPC fan-out
        #[arg(long)]
        snapshot: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("storectl=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let config =
        Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let json = cli.json || config.output.json;

    match cli.command {
        Commands::Conns { snapshot, hostlist } => {
            conns(hostlist.as_deref(), &config, &snapshot, json)
        }
        Commands::List { snapshot } => list(&snapshot, json),
    }
}

/// Targets from --hostlist, then the snapshot, then the config file
fn targets(hostlist: Option<&str>, config: &Config, snapshot: &Snapshot) -> Result<AddressSet> {
    if let Some(hosts) = hostlist {
        return Ok(AddressSet::parse_hostlist(hosts, config.default_port)?);
    }
    if !snapshot.addresses.is_empty() {
        return Ok(snapshot.addresses.clone());
    }
    Ok(config.addresses()?)
}

fn conns(
    hostlist: Option<&str>,
    config: &Config,
    path: &Path,
    json: bool,
) -> Result<ExitCode> {
    let snapshot = Snapshot::load(path)?;
    let addrs = targets(hostlist, config, &snapshot)?;
    let results = snapshot
        .result_map()
        .with_context(|| format!("reading results from {}", path.display()))?;

    let summary = ConnectionSummary::new(&addrs, &results);
    info!(
        active = summary.active().len(),
        failed = summary.failures().len(),
        "connection summary ready"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&summary.to_json())?);
    } else {
        print!("{}", summary);
        if !summary.has_active() {
            println!();
        }
    }

    Ok(if summary.has_active() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn list(path: &Path, json: bool) -> Result<ExitCode> {
    let report = Snapshot::load(path)?
        .into_report()
        .with_context(|| format!("building report from {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.to_json()?)?);
    } else {
        print!("{}", report.render()?);
    }
    Ok(ExitCode::SUCCESS)
}
