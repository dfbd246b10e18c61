mod config;

use anyhow::{Context, Result};
use clap::Parser;
use leb128_codec::{
    decode_signed_prefix_with, decode_unsigned_prefix_with, encode_signed, encode_unsigned,
    DecodeOptions, ReadLeb128, SliceSource,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::{CliConfig, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "leb128")]
#[command(about = "Encode and decode LEB128 varints")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, help = "Config file path")]
    config: Option<String>,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Use the legacy 9 unsigned / 5 signed group caps")]
    legacy: bool,

    #[arg(long, help = "Fail when a varint hits the group cap")]
    strict: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    EncodeUnsigned {
        value: u64,
    },
    EncodeSigned {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    DecodeUnsigned {
        hex: String,
    },
    DecodeSigned {
        hex: String,
    },
    /// Decode a concatenation of varints in order
    ReadStream {
        hex: String,
        #[arg(long, help = "Treat every varint as signed")]
        signed: bool,
    },
    GenerateConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Config file path")]
        output: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("leb128=info,leb128_codec=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;

    // CLI flags win over the config file
    if cli.legacy {
        config.decode = DecodeOptions {
            cap_policy: config.decode.cap_policy,
            ..DecodeOptions::LEGACY
        };
    }
    if cli.strict {
        config.decode = config.decode.strict();
    }
    let json = cli.json || config.json_output;
    debug!(decode = ?config.decode, json, "Effective decode options");

    match cli.command {
        Commands::EncodeUnsigned { value } => {
            let bytes = encode_unsigned(value);
            if json {
                println!("{}", serde_json::json!({
                    "value": value,
                    "hex": hex::encode(&bytes),
                    "len": bytes.len()
                }));
            } else {
                println!("{}", hex::encode(&bytes));
            }
        }
        Commands::EncodeSigned { value } => {
            let bytes = encode_signed(value);
            if json {
                println!("{}", serde_json::json!({
                    "value": value,
                    "hex": hex::encode(&bytes),
                    "len": bytes.len()
                }));
            } else {
                println!("{}", hex::encode(&bytes));
            }
        }
        Commands::DecodeUnsigned { hex } => {
            let bytes = parse_hex(&hex)?;
            let (value, used) = decode_unsigned_prefix_with(&bytes, &config.decode)
                .context("decoding unsigned varint")?;
            print_decoded(json, value.into(), used, bytes.len());
        }
        Commands::DecodeSigned { hex } => {
            let bytes = parse_hex(&hex)?;
            let (value, used) = decode_signed_prefix_with(&bytes, &config.decode)
                .context("decoding signed varint")?;
            print_decoded(json, value.into(), used, bytes.len());
        }
        Commands::ReadStream { hex, signed } => {
            let bytes = parse_hex(&hex)?;
            let values = read_stream(&bytes, signed, &config.decode)?;
            info!("Read {} varints from {} bytes", values.len(), bytes.len());
            if json {
                println!("{}", serde_json::to_string_pretty(&values)?);
            } else {
                for value in &values {
                    println!("{}", value);
                }
            }
        }
        Commands::GenerateConfig { output } => {
            config.save(&output)?;
            if json {
                println!("{}", serde_json::json!({"success": true, "path": output}));
            } else {
                println!("✅ Wrote config to {}", output);
            }
        }
    }

    Ok(())
}

/// Accepts an optional `0x` prefix and ignores whitespace
fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let digits: String = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    hex::decode(&digits).with_context(|| format!("invalid hex input: {}", input))
}

fn read_stream(bytes: &[u8], signed: bool, opts: &DecodeOptions) -> Result<Vec<serde_json::Value>> {
    let mut source = SliceSource::new(bytes);
    let mut values = Vec::new();

    while !source.is_empty() {
        let offset = source.position();
        let decoded = if signed {
            source.read_signed_with(opts).map(serde_json::Value::from)
        } else {
            source.read_unsigned_with(opts).map(serde_json::Value::from)
        };
        let value = decoded.with_context(|| format!("reading varint at offset {}", offset))?;
        debug!(offset, %value, "Decoded varint");
        values.push(value);
    }

    Ok(values)
}

fn print_decoded(json: bool, value: serde_json::Value, used: usize, available: usize) {
    if json {
        println!("{}", serde_json::json!({
            "value": value,
            "consumed": used,
            "trailing": available - used
        }));
    } else {
        println!("{}", value);
        if used < available {
            println!("⚠️  {} trailing bytes ignored", available - used);
        }
    }
}
