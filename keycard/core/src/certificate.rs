/*!
    Identity certificates and the two-step identity check.

    Record layout (98 bytes):
      [0..33]   identity public key, compressed
      [33..65]  r
      [65..97]  s
      [97]      recovery id

    `(r, s, recovery_id)` is the CA's recoverable signature over
    `SHA256(identity public key)`. The CA public key is not transmitted; it is
    recovered from that signature.

    Identity envelope:
      A0 { 8A <certificate record>, <identity signature r | s [| recovery id]> }

    The identity signature covers a caller-chosen hash (usually a challenge)
    and is checked against the certificate's identity key. When it verifies,
    the recovered CA key is returned for the caller to compare with its
    pinned CA key.
*/

use log::{info, warn};

use keycard_format::{FormatError, Reader, tags};

use crate::crypto;
use crate::error::KeycardResult;
use crate::signature::{RAW_SIGNATURE_LEN, RecoverableSignature, split_raw};
use crate::types::PublicKey;

const IDENTITY_KEY_LEN: usize = 33;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    identity_public_key: PublicKey,
    ca_signature: RecoverableSignature,
}

impl Certificate {
    /**
        Tag of the certificate primitive inside an identity envelope.
    */
    pub const TAG: u8 = tags::CERTIFICATE;

    /**
        Length of the certificate record.
    */
    pub const LEN: usize = IDENTITY_KEY_LEN + RAW_SIGNATURE_LEN;

    /**
        Decode a certificate record and recover the CA public key.

        Only the first [`Certificate::LEN`] bytes are read. Nothing is
        validated beyond structure: the identity key is taken as-is and the
        recovered CA key is whatever the signature math produces.
    */
    pub fn decode(data: &[u8]) -> KeycardResult<Self> {
        if data.len() < Self::LEN {
            return Err(FormatError::InvalidLength {
                field: "certificate",
                expected: Self::LEN,
                actual: data.len(),
            }
            .into());
        }

        let identity_public_key = PublicKey::from(data[..IDENTITY_KEY_LEN].to_vec());
        let (r, s, recovery_id) = split_raw(&data[IDENTITY_KEY_LEN..Self::LEN])?;

        let hash = crypto::sha256(identity_public_key.as_bytes());
        let ca_public_key = crypto::recover_public(&r, &s, recovery_id, &hash, true)?;
        let ca_signature = RecoverableSignature::new(r, s, recovery_id, ca_public_key, true);

        Ok(Self {
            identity_public_key,
            ca_signature,
        })
    }

    /**
        Check an identity envelope against `hash`.

        Returns the CA public key recovered from the embedded certificate if
        the identity signature verifies under the certificate's identity key,
        and `None` if it does not. Errors mean the envelope could not be
        decoded at all.
    */
    pub fn verify_identity(hash: &[u8; 32], data: &[u8]) -> KeycardResult<Option<PublicKey>> {
        let mut tlv = Reader::new(data);
        tlv.enter_constructed(tags::SIGNATURE_TEMPLATE)?;

        let certificate = Self::decode(tlv.read_primitive(Self::TAG)?)?;
        let signature = tlv.peek_unread();

        if !crypto::verify(signature, hash, certificate.identity_public_key.as_bytes())? {
            warn!(
                "identity signature rejected for {}",
                certificate.identity_public_key
            );
            return Ok(None);
        }

        info!(
            "identity {} vouched for by CA {}",
            certificate.identity_public_key,
            certificate.ca_public_key()
        );
        Ok(Some(certificate.ca_signature.public_key().clone()))
    }

    pub fn identity_public_key(&self) -> &PublicKey {
        &self.identity_public_key
    }

    pub fn ca_signature(&self) -> &RecoverableSignature {
        &self.ca_signature
    }

    /**
        The CA public key recovered from the certificate signature (compressed).
        Untrusted until compared with a pinned key.
    */
    pub fn ca_public_key(&self) -> &PublicKey {
        self.ca_signature.public_key()
    }

    /**
        Encode back into the 98-byte record.
    */
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.extend_from_slice(self.identity_public_key.as_bytes());
        out.extend_from_slice(&self.ca_signature.to_raw_bytes());
        out
    }
}
