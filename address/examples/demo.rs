//! Walkthrough of the address pipeline, step by step.
//!
//! Generates a key pair, derives its address for each network profile,
//! shows the 25-byte layout, then feeds the validator a few broken
//! addresses.
//!
//! Run with:
//!   RUST_LOG=wallet_address=trace cargo run --example demo

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wallet_address::config::{AddressConfig, NetworkProfile};
use wallet_address::crypto::hash160;
use wallet_address::identity::{is_valid_address, Address, WalletIdentity};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wallet_address=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}==[ Step {num} ]== {title}{RESET}");
}

fn verdict(label: &str, address: &str) {
    let (color, text) = if is_valid_address(address) {
        (GREEN, "valid")
    } else {
        (YELLOW, "rejected")
    };
    println!("  {label:<24} {address:<40} {color}{text}{RESET}");
}

fn main() -> Result<()> {
    init_logging();

    section(1, "Generate a P-256 key pair");
    let identity = WalletIdentity::generate(AddressConfig::default())
        .context("platform randomness unavailable")?;
    let public_key = identity.public_key();
    println!("  X = {}", hex::encode(public_key.x()));
    println!("  Y = {}", hex::encode(public_key.y()));

    section(2, "Hash the public key");
    println!("  RIPEMD160(SHA256(X || Y)) = {}", hex::encode(hash160(public_key.as_bytes())));

    section(3, "Assemble and encode");
    let address = identity.address();
    let bytes = address.to_bytes();
    println!("  version  = {}", hex::encode(&bytes[..1]));
    println!("  hash     = {}", hex::encode(&bytes[1..21]));
    println!("  checksum = {}", hex::encode(&bytes[21..]));
    println!("  address  = {BOLD}{address}{RESET}");

    section(4, "Same key, every network profile");
    for network in NetworkProfile::ALL {
        let derived = Address::from_public_key(&public_key, network.version_byte());
        println!("  {:<8} 0x{:02X}  {}", network.name(), network.version_byte(), derived);
    }

    section(5, "Validation");
    let text = address.encode();
    let mut typo: Vec<char> = text.chars().collect();
    let last = typo.len() - 1;
    typo[last] = if typo[last] == 'z' { 'y' } else { 'z' };
    let typo: String = typo.into_iter().collect();

    verdict("original", &text);
    verdict("last char changed", &typo);
    verdict("truncated", &text[..text.len() - 2]);
    verdict("contains '0'", &format!("0{}", &text[1..]));
    verdict("empty", "");

    println!();
    Ok(())
}
