/*!
    Tag bytes used by the keycard signature and certificate encodings.

    - `0xA0`: signature template (constructed)
    - `0x80`: raw signature, or the public key inside a signature template
    - `0x30`: ECDSA template holding `r` and `s` (constructed)
    - `0x02`: signed big-endian integer
    - `0x8A`: certificate record
*/

pub const SIGNATURE_TEMPLATE: u8 = 0xA0;
pub const RAW_SIGNATURE: u8 = 0x80;
pub const PUBLIC_KEY: u8 = 0x80;
pub const ECDSA_TEMPLATE: u8 = 0x30;
pub const INTEGER: u8 = 0x02;
pub const CERTIFICATE: u8 = 0x8A;
