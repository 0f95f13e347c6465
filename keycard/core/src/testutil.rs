/*!
    Deterministic keys and signatures for unit tests.
*/

use k256::Scalar;
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::PrimeField;

use keycard_format::{Writer, tags};

use crate::crypto::sha256;

pub(crate) fn signing_key(seed: &str) -> SigningKey {
    SigningKey::from_slice(&sha256(seed.as_bytes())).expect("seed hash is a valid scalar")
}

/**
    Sign a prehashed message, returning `(r, s, recovery_id)` with low `s`.
*/
pub(crate) fn sign(key: &SigningKey, hash: &[u8; 32]) -> ([u8; 32], [u8; 32], u8) {
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(hash)
        .expect("signing a 32-byte prehash");
    let (r, s) = signature.split_bytes();
    (r.into(), s.into(), recovery_id.to_byte())
}

/**
    Same signature as [`sign`], rewritten as `(r, n - s, recovery_id ^ 1)`.
*/
pub(crate) fn sign_high_s(key: &SigningKey, hash: &[u8; 32]) -> ([u8; 32], [u8; 32], u8) {
    let (r, s, recovery_id) = sign(key, hash);
    (r, negate_scalar(&s), recovery_id ^ 1)
}

pub(crate) fn negate_scalar(value: &[u8; 32]) -> [u8; 32] {
    let scalar = Option::<Scalar>::from(Scalar::from_repr((*value).into()))
        .expect("value is a canonical scalar");
    (-scalar).to_bytes().into()
}

/**
    `r | s | recovery_id`
*/
pub(crate) fn raw_signature(key: &SigningKey, hash: &[u8; 32]) -> Vec<u8> {
    join_raw(sign(key, hash))
}

/**
    `r | n - s | recovery_id ^ 1`
*/
pub(crate) fn raw_signature_high_s(key: &SigningKey, hash: &[u8; 32]) -> Vec<u8> {
    join_raw(sign_high_s(key, hash))
}

fn join_raw((r, s, id): ([u8; 32], [u8; 32], u8)) -> Vec<u8> {
    let mut out = Vec::with_capacity(65);
    out.extend_from_slice(&r);
    out.extend_from_slice(&s);
    out.push(id);
    out
}

/**
    `A0 { 8A cert, identity_signature }`
*/
pub(crate) fn identity_envelope(certificate: &[u8], identity_signature: &[u8]) -> Vec<u8> {
    let mut w = Writer::new();
    w.constructed(tags::SIGNATURE_TEMPLATE, |w| {
        w.primitive(tags::CERTIFICATE, certificate);
        w.raw(identity_signature);
    });
    w.finish()
}
