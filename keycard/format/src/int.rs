/*!
    Conversions between signed BER integers and fixed-width curve scalars.

    ECDSA templates carry `r` and `s` as signed big-endian integers. A scalar
    with its top bit set gains a `0x00` sign byte (33 bytes); a scalar with
    leading zero bytes may be shortened (31 bytes or fewer).
*/

use crate::error::{FormatError, FormatResult};

/**
    Width of a secp256k1 scalar in bytes.
*/
pub const SCALAR_LEN: usize = 32;

/**
    Convert a signed big-endian integer into a 32-byte unsigned scalar.

    - 33 bytes with a leading `0x00`: the sign byte is dropped.
    - 32 bytes: passed through unchanged.
    - fewer than 32 bytes: left-padded with zeros.
    - anything wider: [`FormatError::IntegerTooWide`].
*/
pub fn to_scalar(value: &[u8]) -> FormatResult<[u8; SCALAR_LEN]> {
    let value = match value {
        [0x00, rest @ ..] if rest.len() == SCALAR_LEN => rest,
        _ => value,
    };

    if value.len() > SCALAR_LEN {
        return Err(FormatError::IntegerTooWide(value.len()));
    }

    let mut out = [0u8; SCALAR_LEN];
    out[SCALAR_LEN - value.len()..].copy_from_slice(value);
    Ok(out)
}

/**
    Minimal signed big-endian encoding of an unsigned scalar.

    Leading zero bytes are dropped (keeping at least one byte), and a `0x00`
    sign byte is prepended when the top bit of the first remaining byte is set.
*/
pub fn to_signed(scalar: &[u8; SCALAR_LEN]) -> Vec<u8> {
    let start = scalar
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(SCALAR_LEN - 1);
    let trimmed = &scalar[start..];

    let mut out = Vec::with_capacity(trimmed.len() + 1);
    if trimmed[0] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(trimmed);
    out
}
