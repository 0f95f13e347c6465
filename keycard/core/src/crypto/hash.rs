use sha2::{Digest, Sha256};

/**
    SHA-256 digest of `data`.
*/
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}
