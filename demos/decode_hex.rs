// ABOUTME: Example application that decodes a hex-encoded SMPP PDU and prints its fields
// ABOUTME: Shows decode, named lookups via the schema, and the TLV tail

use argh::FromArgs;
use smpp_pdu::{DecoderConfig, Encodable, decode_with_config};
use std::error::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Decode a single SMPP v3.4 PDU given as hex
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// reject PDUs whose command_length disagrees with the input
    #[argh(switch, short = 's')]
    strict: bool,

    /// the PDU bytes as hex, e.g. 00000010000000150000000000000001
    #[argh(positional)]
    hex: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let level = if cli_args.debugging {
        Level::TRACE
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cleaned: String = cli_args.hex.split_whitespace().collect();
    let data = hex::decode(cleaned)?;

    let config = DecoderConfig::default().strict_length(cli_args.strict);
    let pdu = decode_with_config(&data, &config)?;

    let header = pdu.header();
    println!(
        "{:?} length={} status={:#010x} sequence={}",
        pdu.kind(),
        header.command_length,
        header.command_status,
        header.sequence_number
    );

    for name in pdu.mandatory_field_names() {
        match pdu.lookup(name) {
            Ok(field) => println!("  {name:<24} {field}"),
            Err(e) => println!("  {name:<24} <{e}>"),
        }
    }

    for tlv in pdu.tlv_fields() {
        println!(
            "  tlv {:#06x} len={} {}",
            tlv.tag,
            tlv.length,
            hex::encode(&tlv.value)
        );
    }

    if pdu.is_truncated() {
        tracing::warn!("PDU ended before all mandatory fields were read");
    }

    tracing::info!("re-encoded: {}", hex::encode(pdu.to_bytes()));

    Ok(())
}
