//! TokenScript Trust Address Tool
//!
//! Loads a signed TokenScript document and prints the trust and revoke addresses
//! for one or more owner (contract) addresses.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin tokenscript-trust -- --config config/tokenscript-trust.toml
//! ```
//!
//! Or without a config file:
//!
//! ```bash
//! cargo run --bin tokenscript-trust -- --document EntryToken.tsml \
//!     --owner 0x63cCEF733a093E5Bd773b41C96D3eCE361464942 --format json
//! ```

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use tokenscript_trust::config::{Config, DocumentConfig, OutputConfig, OwnersConfig};
use tokenscript_trust::{OutputFormat, TokenScriptTrust, TrustReport};

#[derive(Parser, Debug)]
#[command(name = "tokenscript-trust")]
#[command(about = "Derive trust and revoke addresses for a signed TokenScript document")]
struct Args {
    /// Path to configuration file (default: config/tokenscript-trust.toml or TOKENSCRIPT_TRUST_CONFIG_PATH env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Signed TokenScript document (overrides document.path)
    #[arg(short, long)]
    document: Option<String>,

    /// Owner address; repeat for several (overrides owners.addresses)
    #[arg(short, long = "owner")]
    owners: Vec<String>,

    /// Output format (overrides output.format)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

/// Builds the effective configuration.
///
/// Priority: CLI args > config file. The config file is only read when the
/// arguments do not already name both a document and at least one owner.
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match (&args.document, args.owners.is_empty()) {
        (Some(path), false) if args.config.is_none() => Config {
            document: DocumentConfig { path: path.clone() },
            owners: OwnersConfig {
                addresses: args.owners.clone(),
            },
            output: OutputConfig::default(),
        },
        _ => {
            let config = Config::load_from_path(args.config.as_deref())?;
            info!("Configuration loaded successfully");
            config
        }
    };

    if let Some(path) = &args.document {
        config.document.path = path.clone();
    }
    if !args.owners.is_empty() {
        config.owners.addresses = args.owners.clone();
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    // Parse command line arguments first (before initializing logging)
    let args = Args::parse();

    // Logs go to stderr; stdout carries the derived addresses only
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = resolve_config(&args)?;

    info!("Loading TokenScript document: {}", config.document.path);
    let file = File::open(&config.document.path)
        .with_context(|| format!("Failed to open document '{}'", config.document.path))?;
    let trust = TokenScriptTrust::from_reader(BufReader::new(file))
        .with_context(|| format!("Document '{}' is not trusted", config.document.path))?;
    info!(
        "Signer key loaded: {} ({})",
        trust.signer_key().ethereum_address(),
        trust.signer_key().curve()
    );

    let reports = config
        .owners
        .addresses
        .iter()
        .map(|owner| {
            trust
                .report(owner)
                .with_context(|| format!("Cannot derive addresses for owner '{}'", owner))
        })
        .collect::<Result<Vec<TrustReport>>>()?;

    match config.output.format {
        OutputFormat::Text => {
            for report in &reports {
                println!(
                    "{} trust={} revoke={}",
                    report.owner, report.trust_address, report.revoke_address
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(())
}
