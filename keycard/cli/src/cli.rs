use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{InspectCertCommand, RecoverCommand, VerifyIdentityCommand};

/**
    Keycard signature and certificate tool.
*/
#[derive(Parser)]
#[command(name = "keycard")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a 98-byte certificate record.
    InspectCert(InspectCertCommand),
    /// Recover the public key of a raw or templated signature.
    Recover(RecoverCommand),
    /// Check an identity envelope against a challenge hash.
    VerifyIdentity(VerifyIdentityCommand),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Command::InspectCert(cmd) => cmd.run(),
            Command::Recover(cmd) => cmd.run(),
            Command::VerifyIdentity(cmd) => cmd.run(),
        }
    }
}
