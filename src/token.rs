//! Token canonicalization
//!
//! Splits a compact token into its three segments and derives everything
//! the search needs: the signing input (header and payload exactly as
//! they appear in the token, never re-encoded) and the expected
//! signature, both as the original Base64URL text and as decoded bytes.

use crate::codec;
use crate::error::{Error, Result};

/// Canonical form of one token for a cracking run. Built once, then
/// shared read-only by every candidate evaluation.
#[derive(Debug, Clone)]
pub struct CrackTarget {
    /// `header.payload` as raw text: the exact bytes that were signed.
    pub signing_input: String,
    /// The signature segment exactly as it appeared in the token. The
    /// CPU oracle compares against this text, side-stepping any encoder
    /// divergence on non-canonical input.
    pub signature_b64: String,
    /// Decoded signature bytes, handed to the GPU kernel.
    pub expected_signature: Vec<u8>,
}

/// Split a compact token into (signing input, expected signature).
///
/// The parse is deliberately shallow: only the segment count is checked,
/// empty segments are structurally permitted. Header and payload are
/// never decoded, the signing algorithm is fixed per run rather than
/// read from the attacker-controlled header.
pub fn canonicalize(token: &str) -> Result<CrackTarget> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(Error::MalformedToken(format!(
            "expected three '.'-separated segments, found {}",
            parts.len()
        )));
    }

    let expected_signature = codec::decode(parts[2])
        .map_err(|e| Error::MalformedToken(format!("signature segment: {e}")))?;

    Ok(CrackTarget {
        signing_input: format!("{}.{}", parts[0], parts[1]),
        signature_b64: parts[2].to_string(),
        expected_signature,
    })
}
