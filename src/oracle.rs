//! Verification oracle
//!
//! Decides whether a candidate secret reproduces the token's signature.
//! Pure and stateless, safe to call from any number of workers at once.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::codec;
use crate::token::CrackTarget;

type HmacSha256 = Hmac<Sha256>;

/// Returns true when HMAC-SHA256(secret, signing input) reproduces the
/// token's signature.
///
/// The computed digest is encoded and compared against the original
/// signature segment text, not against a re-encoding of the decoded
/// bytes: encodings of equal byte sequences are only guaranteed to agree
/// when canonical, the original text never lies.
pub fn verify(secret: &[u8], target: &CrackTarget) -> bool {
    // HMAC accepts keys of any length; new_from_slice cannot fail here.
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(target.signing_input.as_bytes());
    let digest = mac.finalize().into_bytes();

    codec::encode(&digest) == target.signature_b64
}
