//! Errors for jwtcrack

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid token: {0}")]
    MalformedToken(String),

    #[error("base64url decoding failed: {0}")]
    Decode(String),

    #[error("wordlist contains no candidates")]
    EmptyCandidateSet,

    #[error("{backend} backend unavailable: {reason}")]
    BackendUnavailable {
        backend: &'static str,
        reason: String,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
