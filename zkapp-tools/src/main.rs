use std::{fmt, fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pasta_curves::Fp;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zkapp_account::field::fp_to_decimal;
use zkapp_account::{
    account_from_json, hash_zkapp_uri, AccountDigestCircuit, Actions, Event, Events, LogKind,
    LogParts, LogStack, ZkappAccount, ZkappUri,
};

#[derive(Parser)]
#[command(
    name = "zkapp-tools",
    about = "Utility commands for zkApp account commitments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Digest of a versioned account JSON file.
    AccountDigest(AccountDigestArgs),
    /// Digest of the default account.
    DefaultDigest(OutputArgs),
    /// Hash of a zkApp URI, with its binary wire form.
    UriHash(UriHashArgs),
    /// Digest of an events (or actions) JSON file.
    EventsHash(EventsHashArgs),
    /// Check a log given as a claimed digest and its frames.
    VerifyLog(VerifyLogArgs),
    /// Size of the account digest circuit.
    CircuitStats(OutputArgs),
}

#[derive(Args)]
struct OutputArgs {
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AccountDigestArgs {
    /// `{"version": N, "account": {...}}`
    file: PathBuf,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct UriHashArgs {
    #[arg(required_unless_present = "none", conflicts_with = "none")]
    uri: Option<String>,
    /// Hash the absent URI.
    #[arg(long)]
    none: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct EventsHashArgs {
    /// JSON list of events, top first, each a list of decimal strings.
    file: PathBuf,
    /// Hash as an actions log instead of an events log.
    #[arg(long)]
    actions: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct VerifyLogArgs {
    /// `{"digest": "...", "frames": [{"event": [...], "below": "..."}]}`, top first.
    file: PathBuf,
    /// Check as an actions log instead of an events log.
    #[arg(long)]
    actions: bool,
    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,zkapp_account=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::AccountDigest(args) => account_digest(args),
        Commands::DefaultDigest(args) => default_digest(args),
        Commands::UriHash(args) => uri_hash(args),
        Commands::EventsHash(args) => events_hash(args),
        Commands::VerifyLog(args) => verify_log(args),
        Commands::CircuitStats(args) => circuit_stats(args),
    }
}

fn account_digest(args: AccountDigestArgs) -> Result<()> {
    let json = read_file(&args.file)?;
    let account = account_from_json(&json)
        .with_context(|| format!("failed to decode account {}", args.file.display()))?;
    let summary = DigestSummary::new("account", account.digest());
    output_summary(&summary, args.output.json)
}

fn default_digest(args: OutputArgs) -> Result<()> {
    let summary = DigestSummary::new("default account", ZkappAccount::default_digest());
    output_summary(&summary, args.json)
}

fn uri_hash(args: UriHashArgs) -> Result<()> {
    let summary = match args.uri {
        Some(uri) => {
            let uri: ZkappUri = uri.parse().context("invalid zkapp uri")?;
            UriSummary {
                uri: Some(uri.to_string()),
                length: uri.len(),
                hash: fp_to_decimal(&uri.hash()),
                wire_hex: Some(hex::encode(uri.to_wire())),
            }
        }
        None => UriSummary {
            uri: None,
            length: 0,
            hash: fp_to_decimal(&hash_zkapp_uri(None)),
            wire_hex: None,
        },
    };
    output_summary(&summary, args.output.json)
}

fn events_hash(args: EventsHashArgs) -> Result<()> {
    let json = read_file(&args.file)?;
    let events: Vec<Event> = serde_json::from_str(&json)
        .with_context(|| format!("failed to decode events {}", args.file.display()))?;
    tracing::debug!(count = events.len(), actions = args.actions, "hashing log");
    let (kind, digest) = if args.actions {
        (Actions::NAME, Actions::hash(&events))
    } else {
        (Events::NAME, Events::hash(&events))
    };
    let summary = DigestSummary::new(kind, digest);
    output_summary(&summary, args.output.json)
}

fn verify_log(args: VerifyLogArgs) -> Result<()> {
    let json = read_file(&args.file)?;
    let parts: LogParts = serde_json::from_str(&json)
        .with_context(|| format!("failed to decode log {}", args.file.display()))?;
    let digest = parts.digest;
    let (kind, events) = if args.actions {
        (Actions::NAME, LogStack::<Actions>::from(parts).unwind())
    } else {
        (Events::NAME, LogStack::<Events>::from(parts).unwind())
    };
    let events = events.context("log frames do not match the claimed digest")?;
    tracing::debug!(count = events.len(), kind, "log verified");
    let summary = DigestSummary::new(kind, digest);
    output_summary(&summary, args.output.json)
}

fn circuit_stats(args: OutputArgs) -> Result<()> {
    let (stats, public_inputs) = AccountDigestCircuit
        .stats()
        .context("failed to synthesize account digest circuit")?;
    let summary = StatsSummary {
        num_mul: stats.num_mul,
        num_linear: stats.num_linear,
        num_wires: stats.num_wires,
        total_constraints: stats.total_constraints(),
        public_inputs,
    };
    output_summary(&summary, args.json)
}

fn read_file(path: &PathBuf) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn output_summary<T>(summary: &T, json: bool) -> Result<()>
where
    T: Serialize + fmt::Display,
{
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}

#[derive(Serialize)]
struct DigestSummary {
    kind: String,
    digest: String,
}

impl DigestSummary {
    fn new(kind: &str, digest: Fp) -> Self {
        DigestSummary {
            kind: kind.to_owned(),
            digest: fp_to_decimal(&digest),
        }
    }
}

impl fmt::Display for DigestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "kind: {}", self.kind)?;
        write!(f, "digest: {}", self.digest)
    }
}

#[derive(Serialize)]
struct UriSummary {
    uri: Option<String>,
    length: usize,
    hash: String,
    wire_hex: Option<String>,
}

impl fmt::Display for UriSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.uri, &self.wire_hex) {
            (Some(uri), Some(wire)) => {
                writeln!(f, "uri: {}", uri)?;
                writeln!(f, "length: {} bytes", self.length)?;
                writeln!(f, "wire: {}", wire)?;
            }
            _ => writeln!(f, "uri: <none>")?,
        }
        write!(f, "hash: {}", self.hash)
    }
}

#[derive(Serialize)]
struct StatsSummary {
    num_mul: usize,
    num_linear: usize,
    num_wires: usize,
    total_constraints: usize,
    public_inputs: usize,
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "multiplication gates: {}", self.num_mul)?;
        writeln!(f, "linear constraints: {}", self.num_linear)?;
        writeln!(f, "wires: {}", self.num_wires)?;
        writeln!(f, "total constraints: {}", self.total_constraints)?;
        write!(f, "public inputs: {}", self.public_inputs)
    }
}
