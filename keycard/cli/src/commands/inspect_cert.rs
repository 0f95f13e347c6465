use anyhow::{Context, Result};
use clap::Args;

use keycard::Certificate;

use super::parse_hex;

/**
    Decode a certificate record and print the recovered CA key.
*/
#[derive(Args)]
pub struct InspectCertCommand {
    /// Hex-encoded 98-byte certificate record.
    pub certificate: String,
}

impl InspectCertCommand {
    pub fn run(self) -> Result<()> {
        let data = parse_hex(&self.certificate)?;
        let cert = Certificate::decode(&data).context("failed to decode certificate")?;
        let sig = cert.ca_signature();

        println!("Identity Key:  {}", cert.identity_public_key());
        println!("R:             {}", hex::encode(sig.r()));
        println!("S:             {}", hex::encode(sig.s()));
        println!("Recovery ID:   {}", sig.recovery_id());
        println!("CA Key:        {}", cert.ca_public_key());

        Ok(())
    }
}
