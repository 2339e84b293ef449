//! JWT Secret Cracker Library
//!
//! Recovers the HMAC-SHA256 signing secret of a compact JWT by testing
//! candidate secrets from a wordlist, on CPU worker threads or a GPU
//! batch-compute backend.

pub mod codec;
pub mod error;
pub mod inspect;
pub mod oracle;
pub mod reader;
pub mod report;
pub mod search;
pub mod token;

#[cfg(feature = "gpu")]
pub mod metal;

pub use error::{Error, Result};
pub use search::{search, ExecutionBackend, SearchOutcome, Verdict};
pub use token::{canonicalize, CrackTarget};
