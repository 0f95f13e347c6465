#![allow(clippy::doc_overindented_list_items)]

mod certificate;
mod error;
mod signature;
mod types;

pub mod crypto;

#[cfg(test)]
mod testutil;

pub mod format {
    pub use keycard_format::*;
}

pub use self::certificate::Certificate;
pub use self::error::{KeycardError, KeycardResult};
pub use self::signature::{RAW_SIGNATURE_LEN, RecoverableSignature, calculate_recovery_id};
pub use self::types::PublicKey;
