//! Base64URL encoding/decoding per RFC 4648
//!
//! Thin wrapper around the `base64` crate. Encoding is always unpadded;
//! decoding accepts both padded and unpadded input, since signature
//! segments in the wild show up both ways.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::{Error, Result};

const URL_SAFE_FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode a Base64URL string to bytes. Padding is optional.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    URL_SAFE_FORGIVING
        .decode(input)
        .map_err(|e| Error::Decode(e.to_string()))
}

/// Encode bytes as unpadded Base64URL. Total over all byte sequences.
pub fn encode(data: &[u8]) -> String {
    URL_SAFE_FORGIVING.encode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for data in [
            &b""[..],
            &b"f"[..],
            &b"fo"[..],
            &b"foo"[..],
            &b"foob"[..],
            &[0x00, 0xff, 0x7f, 0x80][..],
            &[0xfb, 0xff, 0xbe][..], // encodes to '-' and '_'
        ] {
            assert_eq!(decode(&encode(data)).unwrap(), data);
        }
    }

    #[test]
    fn test_encode_url_safe_unpadded() {
        // 0xfbff -> "-_8" in the URL-safe alphabet, no '=' padding
        assert_eq!(encode(&[0xfb, 0xff]), "-_8");
        assert_eq!(encode(b"Hello"), "SGVsbG8");
    }

    #[test]
    fn test_decode_padding_insensitive() {
        assert_eq!(decode("SGVsbG8").unwrap(), b"Hello");
        assert_eq!(decode("SGVsbG8=").unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_accepts_nonzero_trailing_bits() {
        // '9' carries the same payload bits as the canonical '8' plus a
        // set trailing bit; a forgiving decoder yields the same bytes.
        assert_eq!(decode("SGVsbG9").unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_invalid() {
        assert!(decode("!!!").is_err());
        // '+' belongs to the standard alphabet, not URL-safe
        assert!(decode("a+b8").is_err());
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }
}
