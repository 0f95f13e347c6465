use thiserror::Error;

use keycard_format::FormatError;

/**
    Errors from decoding keycard signatures and certificates.

    A certificate that is well-formed but not trusted is not an error;
    see [`crate::Certificate::verify_identity`].
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeycardError {
    // ── Encoding (delegated to keycard-format) ────────────────────────
    #[error("malformed encoding: {0}")]
    MalformedEncoding(#[from] FormatError),

    // ── Recovery ──────────────────────────────────────────────────────
    #[error("no recovery id maps the signature to the expected public key")]
    UnrecoverableSignature,

    // ── Keys ──────────────────────────────────────────────────────────
    #[error("invalid secp256k1 public key: {0}")]
    InvalidPublicKey(String),
}

/**
    Type alias for results that may return a [`KeycardError`].
*/
pub type KeycardResult<T> = std::result::Result<T, KeycardError>;
