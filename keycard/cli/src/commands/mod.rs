mod inspect_cert;
mod recover;
mod verify_identity;

use anyhow::{Context, Result, bail};

pub use self::inspect_cert::InspectCertCommand;
pub use self::recover::RecoverCommand;
pub use self::verify_identity::VerifyIdentityCommand;

/**
    Decode a hex argument, ignoring whitespace and an optional `0x` prefix.
*/
pub(crate) fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let cleaned = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
        .unwrap_or(cleaned.as_str());
    hex::decode(cleaned).context("invalid hex input")
}

/**
    Decode a 32-byte hash argument.
*/
pub(crate) fn parse_hash(input: &str) -> Result<[u8; 32]> {
    let bytes = parse_hex(input)?;
    match <[u8; 32]>::try_from(bytes.as_slice()) {
        Ok(hash) => Ok(hash),
        Err(_) => bail!("hash must be 32 bytes, got {}", bytes.len()),
    }
}
