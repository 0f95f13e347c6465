/*!
    secp256k1 ECDSA recovery and verification over prehashed messages.

    - Recover: `(r, s, recovery_id, hash)` → SEC1 public key
    - Verify:  raw `r || s` (optionally followed by a recovery byte) against
               `hash` and a SEC1 public key

    Scalars are 32 bytes, big-endian. The curve backend only accepts low-S, so
    high-S signatures are normalised before recovery (flipping the recovery
    id's y parity) and before verification.
*/

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

use keycard_format::FormatError;

use crate::error::{KeycardError, KeycardResult};
use crate::types::PublicKey;

/**
    Recover the public key that produced `(r, s)` over `hash`, using the
    candidate selected by `recovery_id`.

    Fails with [`KeycardError::UnrecoverableSignature`] if the id is outside
    `0..=3`, the scalars are out of range, or no curve point exists for the
    candidate.
*/
pub fn recover_public(
    r: &[u8; 32],
    s: &[u8; 32],
    recovery_id: u8,
    hash: &[u8; 32],
    compressed: bool,
) -> KeycardResult<PublicKey> {
    let recovery_id =
        RecoveryId::from_byte(recovery_id).ok_or(KeycardError::UnrecoverableSignature)?;
    let signature = signature_from_scalars(r, s).ok_or(KeycardError::UnrecoverableSignature)?;

    // (r, n - s) is the same signature with R negated, so the y parity flips.
    let (signature, recovery_id) = match signature.normalize_s() {
        Some(low) => (
            low,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (signature, recovery_id),
    };

    let key = VerifyingKey::recover_from_prehash(hash, &signature, recovery_id)
        .map_err(|_| KeycardError::UnrecoverableSignature)?;

    Ok(PublicKey::from_verifying_key(&key, compressed))
}

/**
    Verify a raw ECDSA signature over `hash` with `public_key`.

    `signature` is `r[32] | s[32]`, optionally followed by a recovery byte that
    plain verification ignores. Returns `Ok(false)` when the signature does not
    verify; errors are reserved for inputs that cannot be interpreted at all.
*/
pub fn verify(signature: &[u8], hash: &[u8; 32], public_key: &[u8]) -> KeycardResult<bool> {
    let key = VerifyingKey::from_sec1_bytes(public_key)
        .map_err(|e| KeycardError::InvalidPublicKey(e.to_string()))?;

    let rs = match signature.len() {
        64 | 65 => &signature[..64],
        actual => {
            return Err(FormatError::InvalidLength {
                field: "identity signature",
                expected: 64,
                actual,
            }
            .into());
        }
    };

    // Zero or out-of-range scalars can never verify.
    let Ok(signature) = Signature::from_slice(rs) else {
        return Ok(false);
    };
    let signature = signature.normalize_s().unwrap_or(signature);

    Ok(key.verify_prehash(hash, &signature).is_ok())
}

fn signature_from_scalars(r: &[u8; 32], s: &[u8; 32]) -> Option<Signature> {
    let mut rs = [0u8; 64];
    rs[..32].copy_from_slice(r);
    rs[32..].copy_from_slice(s);
    Signature::from_slice(&rs).ok()
}
