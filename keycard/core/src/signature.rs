/*!
    Recoverable ECDSA signatures.

    Two wire forms are accepted, selected by the leading tag:

    - Raw (`0x80`): `r[32] | s[32] | recovery_id[1]`. The public key is
      recovered from the given id.
    - Template (`0xA0`): `A0 { 80 public_key, 30 { 02 r, 02 s } }`. `r` and `s`
      are signed integers; the recovery id is found by trying `0..=3` until a
      candidate matches the explicit public key.
*/

use log::debug;

use keycard_format::{FormatError, Reader, Writer, int, tags};

use crate::crypto;
use crate::error::{KeycardError, KeycardResult};
use crate::types::PublicKey;

/**
    Length of the raw signature record: `r[32] | s[32] | recovery_id[1]`.
*/
pub const RAW_SIGNATURE_LEN: usize = 65;

/**
    An ECDSA signature together with the recovery id and the public key it
    recovers to.

    Values decoded from the wire always satisfy
    `public_key == recover(r, s, recovery_id, hash, compressed)` for the hash
    they were decoded against.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverableSignature {
    r: [u8; 32],
    s: [u8; 32],
    recovery_id: u8,
    public_key: PublicKey,
    compressed: bool,
}

impl RecoverableSignature {
    /**
        Assemble a signature from parts the caller has already checked.
    */
    pub fn new(
        r: [u8; 32],
        s: [u8; 32],
        recovery_id: u8,
        public_key: PublicKey,
        compressed: bool,
    ) -> Self {
        Self {
            r,
            s,
            recovery_id,
            public_key,
            compressed,
        }
    }

    /**
        Decode a TLV-encoded signature over `hash`, in raw or template form.
    */
    pub fn from_tlv(hash: &[u8; 32], data: &[u8]) -> KeycardResult<Self> {
        let mut tlv = Reader::new(data);

        match tlv.peek_tag()? {
            tags::RAW_SIGNATURE => {
                let raw = tlv.read_primitive(tags::RAW_SIGNATURE)?;
                Self::from_raw(hash, raw)
            }
            tags::SIGNATURE_TEMPLATE => Self::from_template(hash, &mut tlv),
            actual => Err(FormatError::UnexpectedTag {
                expected: tags::SIGNATURE_TEMPLATE,
                actual,
            }
            .into()),
        }
    }

    /**
        Decode a bare 65-byte raw signature over `hash`.

        The public key is recovered uncompressed.
    */
    pub fn from_raw(hash: &[u8; 32], data: &[u8]) -> KeycardResult<Self> {
        let (r, s, recovery_id) = split_raw(data)?;
        let public_key = crypto::recover_public(&r, &s, recovery_id, hash, false)?;

        Ok(Self {
            r,
            s,
            recovery_id,
            public_key,
            compressed: false,
        })
    }

    fn from_template(hash: &[u8; 32], tlv: &mut Reader<'_>) -> KeycardResult<Self> {
        tlv.enter_constructed(tags::SIGNATURE_TEMPLATE)?;
        let public_key = PublicKey::from(tlv.read_primitive(tags::PUBLIC_KEY)?.to_vec());

        tlv.enter_constructed(tags::ECDSA_TEMPLATE)?;
        let r = int::to_scalar(tlv.read_primitive(tags::INTEGER)?)?;
        let s = int::to_scalar(tlv.read_primitive(tags::INTEGER)?)?;

        let compressed = false;
        let recovery_id = calculate_recovery_id(hash, &public_key, &r, &s, compressed)?;

        Ok(Self {
            r,
            s,
            recovery_id,
            public_key,
            compressed,
        })
    }

    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /**
        Encode as the 65-byte raw record.
    */
    pub fn to_raw_bytes(&self) -> [u8; RAW_SIGNATURE_LEN] {
        let mut out = [0u8; RAW_SIGNATURE_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.recovery_id;
        out
    }

    /**
        Encode in template form, with minimal signed integers for `r` and `s`.
    */
    pub fn to_tlv(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.constructed(tags::SIGNATURE_TEMPLATE, |w| {
            w.primitive(tags::PUBLIC_KEY, self.public_key.as_bytes());
            w.constructed(tags::ECDSA_TEMPLATE, |w| {
                w.primitive(tags::INTEGER, &int::to_signed(&self.r));
                w.primitive(tags::INTEGER, &int::to_signed(&self.s));
            });
        });
        w.finish()
    }
}

/**
    Find the recovery id under which `(r, s)` over `hash` recovers to
    `public_key`.

    Candidates are tried in increasing order and the first match wins.
*/
pub fn calculate_recovery_id(
    hash: &[u8; 32],
    public_key: &PublicKey,
    r: &[u8; 32],
    s: &[u8; 32],
    compressed: bool,
) -> KeycardResult<u8> {
    for id in 0..4 {
        match crypto::recover_public(r, s, id, hash, compressed) {
            Ok(candidate) if candidate == *public_key => {
                debug!("recovery id {id} matches {public_key}");
                return Ok(id);
            }
            Ok(candidate) => debug!("recovery id {id} recovers {candidate}, no match"),
            Err(_) => debug!("recovery id {id} has no curve point"),
        }
    }

    Err(KeycardError::UnrecoverableSignature)
}

/**
    Split a raw record into `(r, s, recovery_id)`.
*/
pub(crate) fn split_raw(data: &[u8]) -> KeycardResult<([u8; 32], [u8; 32], u8)> {
    if data.len() != RAW_SIGNATURE_LEN {
        return Err(FormatError::InvalidLength {
            field: "raw signature",
            expected: RAW_SIGNATURE_LEN,
            actual: data.len(),
        }
        .into());
    }

    let mut r = [0u8; 32];
    r.copy_from_slice(&data[..32]);
    let mut s = [0u8; 32];
    s.copy_from_slice(&data[32..64]);

    Ok((r, s, data[64]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::sha256;
    use crate::testutil::{raw_signature, raw_signature_high_s, sign, sign_high_s, signing_key};

    fn raw_tlv(raw: &[u8]) -> Vec<u8> {
        let mut w = Writer::new();
        w.primitive(tags::RAW_SIGNATURE, raw);
        w.finish()
    }

    fn template_tlv(public_key: &[u8], r: &[u8], s: &[u8]) -> Vec<u8> {
        let mut w = Writer::new();
        w.constructed(tags::SIGNATURE_TEMPLATE, |w| {
            w.primitive(tags::PUBLIC_KEY, public_key);
            w.constructed(tags::ECDSA_TEMPLATE, |w| {
                w.primitive(tags::INTEGER, r);
                w.primitive(tags::INTEGER, s);
            });
        });
        w.finish()
    }

    #[test]
    fn raw_form_recovers_signer() {
        let key = signing_key("card");
        let hash = sha256(b"challenge");
        let raw = raw_signature(&key, &hash);

        let sig = RecoverableSignature::from_tlv(&hash, &raw_tlv(&raw)).unwrap();
        assert!(!sig.is_compressed());
        assert_eq!(sig.recovery_id(), raw[64]);
        assert_eq!(
            sig.public_key(),
            &PublicKey::from_verifying_key(key.verifying_key(), false)
        );
        assert_eq!(sig.to_raw_bytes().as_slice(), raw.as_slice());
    }

    #[test]
    fn raw_form_accepts_high_s() {
        let key = signing_key("card");
        let hash = sha256(b"challenge");
        let raw = raw_signature_high_s(&key, &hash);

        let sig = RecoverableSignature::from_tlv(&hash, &raw_tlv(&raw)).unwrap();
        assert_eq!(
            sig.public_key(),
            &PublicKey::from_verifying_key(key.verifying_key(), false)
        );
        // The wire values are kept as sent.
        assert_eq!(sig.to_raw_bytes().as_slice(), raw.as_slice());
    }

    #[test]
    fn template_search_accepts_high_s() {
        for seed in ["card", "reader", "issuer", "device", "host"] {
            let key = signing_key(seed);
            let hash = sha256(seed.as_bytes());
            let (r, s, id) = sign_high_s(&key, &hash);
            let public = PublicKey::from_verifying_key(key.verifying_key(), false);

            let data = template_tlv(public.as_bytes(), &int::to_signed(&r), &int::to_signed(&s));
            let sig = RecoverableSignature::from_tlv(&hash, &data).unwrap();
            assert_eq!(sig.recovery_id(), id);
            assert_eq!(sig.public_key(), &public);
            assert_eq!(sig.s(), &s);
        }
    }

    #[test]
    fn template_search_finds_true_id() {
        for seed in ["card", "reader", "issuer", "device", "host"] {
            let key = signing_key(seed);
            let hash = sha256(seed.as_bytes());
            let (r, s, id) = sign(&key, &hash);
            let public = PublicKey::from_verifying_key(key.verifying_key(), false);

            let data = template_tlv(public.as_bytes(), &int::to_signed(&r), &int::to_signed(&s));
            let sig = RecoverableSignature::from_tlv(&hash, &data).unwrap();
            assert_eq!(sig.recovery_id(), id);
            assert_eq!(sig.public_key(), &public);
            assert_eq!(sig.r(), &r);
            assert_eq!(sig.s(), &s);
        }
    }

    #[test]
    fn raw_and_template_forms_agree() {
        let key = signing_key("card");
        let hash = sha256(b"challenge");
        let raw = raw_signature(&key, &hash);

        let from_raw = RecoverableSignature::from_tlv(&hash, &raw_tlv(&raw)).unwrap();
        let from_template = RecoverableSignature::from_tlv(&hash, &from_raw.to_tlv()).unwrap();
        assert_eq!(from_raw, from_template);
    }

    #[test]
    fn template_accepts_full_width_unpadded_integers() {
        let key = signing_key("card");
        let hash = sha256(b"challenge");
        let (r, s, id) = sign(&key, &hash);
        let public = PublicKey::from_verifying_key(key.verifying_key(), false);

        let sig = RecoverableSignature::from_tlv(&hash, &template_tlv(public.as_bytes(), &r, &s))
            .unwrap();
        assert_eq!(sig.recovery_id(), id);
    }

    #[test]
    fn template_with_wrong_hash_is_unrecoverable() {
        let key = signing_key("card");
        let signed = sha256(b"challenge");
        let (r, s, _) = sign(&key, &signed);
        let public = PublicKey::from_verifying_key(key.verifying_key(), false);

        let data = template_tlv(public.as_bytes(), &int::to_signed(&r), &int::to_signed(&s));
        let err = RecoverableSignature::from_tlv(&sha256(b"something else"), &data).unwrap_err();
        assert_eq!(err, KeycardError::UnrecoverableSignature);
    }

    #[test]
    fn template_with_other_public_key_is_unrecoverable() {
        let key = signing_key("card");
        let hash = sha256(b"challenge");
        let (r, s, _) = sign(&key, &hash);
        let other = PublicKey::from_verifying_key(signing_key("other").verifying_key(), false);

        let err = calculate_recovery_id(&hash, &other, &r, &s, false).unwrap_err();
        assert_eq!(err, KeycardError::UnrecoverableSignature);
    }

    #[test]
    fn unexpected_leading_tag() {
        let data = [tags::ECDSA_TEMPLATE, 0x00];
        let err = RecoverableSignature::from_tlv(&sha256(b"m"), &data).unwrap_err();
        assert_eq!(
            err,
            KeycardError::MalformedEncoding(FormatError::UnexpectedTag {
                expected: tags::SIGNATURE_TEMPLATE,
                actual: tags::ECDSA_TEMPLATE,
            })
        );
    }

    #[test]
    fn raw_form_with_wrong_length() {
        let err = RecoverableSignature::from_tlv(&sha256(b"m"), &raw_tlv(&[0x11; 64])).unwrap_err();
        assert!(matches!(
            err,
            KeycardError::MalformedEncoding(FormatError::InvalidLength {
                expected: 65,
                actual: 64,
                ..
            })
        ));
    }

    #[test]
    fn raw_form_with_bad_recovery_id() {
        let key = signing_key("card");
        let hash = sha256(b"challenge");
        let mut raw = raw_signature(&key, &hash);
        raw[64] = 7;
        let err = RecoverableSignature::from_raw(&hash, &raw).unwrap_err();
        assert_eq!(err, KeycardError::UnrecoverableSignature);
    }
}
