use core::fmt;

use k256::ecdsa::VerifyingKey;

use crate::error::{KeycardError, KeycardResult};

/**
    A secp256k1 public key in SEC1 encoding.

    Either compressed (33 bytes, `0x02`/`0x03` prefix) or uncompressed
    (65 bytes, `0x04` prefix). Equality is byte equality, so the same point
    in two encodings compares unequal.

    See SEC1 <https://www.secg.org/sec1-v2.pdf> section 2.3.3 for details.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey(Vec<u8>);

impl PublicKey {
    /**
        Parse SEC1 bytes, checking that they encode a point on the curve.
    */
    pub fn parse(bytes: &[u8]) -> KeycardResult<Self> {
        VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| KeycardError::InvalidPublicKey(e.to_string()))?;
        Ok(Self(bytes.to_vec()))
    }

    pub(crate) fn from_verifying_key(key: &VerifyingKey, compressed: bool) -> Self {
        Self(key.to_encoded_point(compressed).as_bytes().to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn is_compressed(&self) -> bool {
        self.0.len() == 33
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl From<Vec<u8>> for PublicKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
