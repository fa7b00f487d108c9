//! bssz - inspect SSZ-encoded beacon chain records
//!
//! Decodes records, computes hash tree roots and derives block headers.
//! Every command prints one JSON object on stdout.

mod logging;

use anyhow::Context;
use beacon_ssz::constants::MAX_MERKLE_DEPTH;
use beacon_ssz::merkle::{verify_branch, zero_hash};
use beacon_ssz::model::hex;
use beacon_ssz::types::{
    kzg_commitment_position, BeaconBlock, BeaconBlockBody, BeaconBlockHeader, Deposit, Eth1Data,
    ExecutionPayload, ForkVersion, Withdrawal,
};
use beacon_ssz::{Engine, EngineConfig, SimpleSerialize};
use clap::{Parser, Subcommand};
use logging::{LogFormat, LogLevel};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bssz")]
#[command(about = "SSZ encoding and hash tree roots for beacon chain records")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.config/beacon-ssz/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable the hash cache regardless of config
    #[arg(long)]
    cache: bool,

    /// Log level for stderr output
    #[arg(long, default_value = "warn")]
    log_level: LogLevel,

    /// Log line format
    #[arg(long, default_value = "plaintext")]
    log_format: LogFormat,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum RecordKind {
    Block,
    Body,
    Header,
    Withdrawal,
    Deposit,
    Eth1Data,
    Payload,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the hash tree root of an encoded record
    Root {
        /// Record type
        #[arg(short = 't', long = "type")]
        kind: RecordKind,
        /// Input file, or - for stdin
        input: String,
        /// Input is 0x-prefixed hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },

    /// Decode an encoded record and print it as JSON
    Decode {
        /// Record type
        #[arg(short = 't', long = "type")]
        kind: RecordKind,
        /// Input file, or - for stdin
        input: String,
        /// Input is 0x-prefixed hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },

    /// Encode a JSON record and print its SSZ bytes as hex
    Encode {
        /// Record type
        #[arg(short = 't', long = "type")]
        kind: RecordKind,
        /// JSON input file, or - for stdin
        input: String,
        /// Also write the raw encoding to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Decode a block and derive its header
    Header {
        /// Fork version to tag the block with
        #[arg(long, default_value = "4")]
        fork_version: u32,
        /// Input file, or - for stdin
        input: String,
        /// Input is 0x-prefixed hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },

    /// Prove a blob KZG commitment against a block's body root
    KzgProof {
        /// Commitment index within the body
        #[arg(short, long)]
        index: usize,
        /// Input file, or - for stdin
        input: String,
        /// Input is 0x-prefixed hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },

    /// Print the zero-subtree hash for each depth
    ZeroHashes {
        /// Deepest level to print
        #[arg(short, long, default_value = "8")]
        depth: usize,
    },
}

/// Run `$func::<T>(args..)` with `T` picked by record kind
macro_rules! with_record {
    ($kind:expr, $func:ident ( $($arg:expr),* )) => {
        match $kind {
            RecordKind::Block => $func::<BeaconBlock>($($arg),*),
            RecordKind::Body => $func::<BeaconBlockBody>($($arg),*),
            RecordKind::Header => $func::<BeaconBlockHeader>($($arg),*),
            RecordKind::Withdrawal => $func::<Withdrawal>($($arg),*),
            RecordKind::Deposit => $func::<Deposit>($($arg),*),
            RecordKind::Eth1Data => $func::<Eth1Data>($($arg),*),
            RecordKind::Payload => $func::<ExecutionPayload>($($arg),*),
        }
    };
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level, cli.log_format);

    match run(&cli) {
        Ok(value) => {
            output(&cli.format, &value);
            Ok(())
        }
        Err(err) => {
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "error",
                    "message": format!("{:#}", err)
                }),
            );
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<serde_json::Value> {
    let mut config = EngineConfig::load_or_default(cli.config.as_deref())?;
    if cli.cache {
        config.hash_cache.enabled = true;
    }
    let engine = Engine::new(&config);

    let mut value = match &cli.command {
        Commands::Root { kind, input, hex } => {
            let bytes = read_input(input, *hex)?;
            with_record!(*kind, root_of(&engine, &bytes))?
        }

        Commands::Decode { kind, input, hex } => {
            let bytes = read_input(input, *hex)?;
            with_record!(*kind, decode_as(&engine, &bytes))?
        }

        Commands::Encode { kind, input, out } => {
            let text = read_text(input)?;
            let bytes = with_record!(*kind, encode_as(&engine, &text))?;
            if let Some(path) = out {
                std::fs::write(path, &bytes)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            serde_json::json!({
                "status": "ok",
                "length": bytes.len(),
                "ssz": hex::encode(&bytes)
            })
        }

        Commands::Header {
            fork_version,
            input,
            hex,
        } => {
            let bytes = read_input(input, *hex)?;
            let block = BeaconBlock::from_ssz(&bytes, ForkVersion(*fork_version))?;
            let header = engine.block_header(&block)?;
            let block_root = engine.hash_tree_root(&header)?;
            let body_root = header.body_root.to_hex();
            serde_json::json!({
                "status": "ok",
                "version": block.version().0,
                "header": serde_json::to_value(&header)?,
                "body_root": body_root,
                "block_root": block_root.to_hex()
            })
        }

        Commands::KzgProof { index, input, hex } => {
            let bytes = read_input(input, *hex)?;
            let block: BeaconBlock = engine.unmarshal(&bytes)?;
            let hasher = engine.hasher();
            let body = block.body();
            let commitment = body
                .blob_kzg_commitments
                .get(*index)
                .with_context(|| format!("block has no commitment at index {}", index))?;
            let branch = body
                .kzg_commitment_inclusion_proof(*index, &hasher)?
                .with_context(|| format!("block has no commitment at index {}", index))?;
            let leaf = commitment.hash_tree_root_with(&hasher)?;
            let position = kzg_commitment_position(*index)?;
            let body_root = body.hash_tree_root_with(&hasher)?;
            serde_json::json!({
                "status": "ok",
                "index": index,
                "commitment": commitment.to_hex(),
                "leaf": leaf.to_hex(),
                "position": position,
                "branch": branch.iter().map(|node| node.to_hex()).collect::<Vec<_>>(),
                "body_root": body_root.to_hex(),
                "verified": verify_branch(leaf, &branch, position, body_root)
            })
        }

        Commands::ZeroHashes { depth } => {
            anyhow::ensure!(
                *depth <= MAX_MERKLE_DEPTH,
                "depth {} exceeds maximum {}",
                depth,
                MAX_MERKLE_DEPTH
            );
            let hashes: Vec<_> = (0..=*depth)
                .map(|d| serde_json::json!({ "depth": d, "hash": zero_hash(d).to_hex() }))
                .collect();
            serde_json::json!({
                "status": "ok",
                "zero_hashes": hashes
            })
        }
    };

    if let (Some(stats), Some(object)) = (engine.cache_stats(), value.as_object_mut()) {
        object.insert("cache".into(), serde_json::to_value(stats)?);
    }
    Ok(value)
}

fn root_of<T: SimpleSerialize>(engine: &Engine, bytes: &[u8]) -> anyhow::Result<serde_json::Value> {
    let value: T = engine.unmarshal(bytes)?;
    let root = engine.hash_tree_root(&value)?;
    Ok(serde_json::json!({
        "status": "ok",
        "shape": T::shape()?.to_string(),
        "length": bytes.len(),
        "root": root.to_hex()
    }))
}

fn decode_as<T: SimpleSerialize + Serialize>(
    engine: &Engine,
    bytes: &[u8],
) -> anyhow::Result<serde_json::Value> {
    let value: T = engine.unmarshal(bytes)?;
    Ok(serde_json::json!({
        "status": "ok",
        "length": bytes.len(),
        "value": value
    }))
}

fn encode_as<T: SimpleSerialize + DeserializeOwned>(
    engine: &Engine,
    text: &str,
) -> anyhow::Result<Vec<u8>> {
    let value: T = serde_json::from_str(text).context("Invalid JSON record")?;
    Ok(engine.marshal(&value)?)
}

fn read_text(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(Path::new(input)).with_context(|| format!("Failed to read {}", input))
}

fn read_input(input: &str, is_hex: bool) -> anyhow::Result<Vec<u8>> {
    if is_hex {
        let text = read_text(input)?;
        return Ok(hex::decode(text.trim())?);
    }
    if input == "-" {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        return Ok(bytes);
    }
    std::fs::read(Path::new(input)).with_context(|| format!("Failed to read {}", input))
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Text => serde_json::to_string_pretty(value),
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(err) => eprintln!("failed to render output: {}", err),
    }
}
