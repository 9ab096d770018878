//! Get TokenScript Signer Address
//!
//! This binary loads a signed TokenScript document and prints the address of the
//! signer key embedded in its certificate (keccak256 of the public key, last 20
//! bytes). Use it to check which issuer signed a document before publishing its
//! trust address.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin signer_address -- path/to/EntryToken.tsml
//! ```

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use tokenscript_trust::TokenScriptTrust;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("Usage: signer_address <document.tsml>")?;

    let file = File::open(&path).with_context(|| format!("Failed to open document '{}'", path))?;
    let trust = TokenScriptTrust::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to load signer key from '{}'", path))?;

    println!("{}", trust.signer_key().ethereum_address());

    Ok(())
}
