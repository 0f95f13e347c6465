use thiserror::Error;

/**
    Errors from decoding the BER-TLV wire encoding and its fixed-width records.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    // ── Cursor ─────────────────────────────────────────────────────────
    #[error("truncated {0}")]
    Truncated(&'static str),

    // ── Tags / lengths ────────────────────────────────────────────────
    #[error("unexpected tag 0x{actual:02X}, expected 0x{expected:02X}")]
    UnexpectedTag { expected: u8, actual: u8 },
    #[error("unsupported BER length prefix 0x{0:02X}")]
    UnsupportedLength(u8),
    #[error("{field} must be {expected} bytes, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    // ── Integers ──────────────────────────────────────────────────────
    #[error("integer of {0} bytes does not fit a 32-byte scalar")]
    IntegerTooWide(usize),
}

/**
    Type alias for results that may return a [`FormatError`].
*/
pub type FormatResult<T> = std::result::Result<T, FormatError>;
