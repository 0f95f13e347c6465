use anyhow::{Context, Result};
use clap::Args;

use keycard::RecoverableSignature;

use super::{parse_hash, parse_hex};

/**
    Decode a TLV signature (raw `0x80` or template `0xA0`) and recover its
    public key.
*/
#[derive(Args)]
pub struct RecoverCommand {
    /// Hex-encoded 32-byte hash the signature covers.
    #[arg(long)]
    pub hash: String,
    /// Hex-encoded TLV signature.
    pub signature: String,
}

impl RecoverCommand {
    pub fn run(self) -> Result<()> {
        let hash = parse_hash(&self.hash)?;
        let data = parse_hex(&self.signature)?;
        let sig =
            RecoverableSignature::from_tlv(&hash, &data).context("failed to decode signature")?;

        println!("Recovery ID:  {}", sig.recovery_id());
        println!("Public Key:   {}", sig.public_key());
        println!("R:            {}", hex::encode(sig.r()));
        println!("S:            {}", hex::encode(sig.s()));

        Ok(())
    }
}
