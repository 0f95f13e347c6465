/*!
    Curve primitives used by signature and certificate decoding.

    All asymmetric crypto uses secp256k1:
    - public-key recovery from `(r, s, recovery_id, hash)`
    - plain ECDSA verification of a prehashed message

    Hashing is SHA-256.
*/

mod ecdsa;
mod hash;

pub use self::ecdsa::{recover_public, verify};
pub use self::hash::sha256;
