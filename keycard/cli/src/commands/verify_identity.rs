use anyhow::{Context, Result, bail};
use clap::Args;
use log::info;

use keycard::Certificate;

use super::{parse_hash, parse_hex};

/**
    Verify an identity envelope (`A0 { 8A cert, signature }`) against a
    challenge hash, optionally checking the CA key against a pinned one.
*/
#[derive(Args)]
pub struct VerifyIdentityCommand {
    /// Hex-encoded 32-byte challenge hash.
    #[arg(long)]
    pub hash: String,
    /// Hex-encoded pinned CA public key (compressed).
    #[arg(long)]
    pub ca: Option<String>,
    /// Hex-encoded identity envelope.
    pub envelope: String,
}

impl VerifyIdentityCommand {
    pub fn run(self) -> Result<()> {
        let hash = parse_hash(&self.hash)?;
        let data = parse_hex(&self.envelope)?;

        let Some(ca_key) = Certificate::verify_identity(&hash, &data)
            .context("failed to decode identity envelope")?
        else {
            bail!("identity signature does not verify");
        };

        println!("CA Key:  {ca_key}");

        if let Some(pinned) = &self.ca {
            let pinned = parse_hex(pinned)?;
            if ca_key.as_bytes() != pinned.as_slice() {
                bail!("CA key does not match the pinned key");
            }
            info!("CA key matches pinned key");
            println!("Trusted: yes");
        }

        Ok(())
    }
}
