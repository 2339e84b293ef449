//! GPU batch-compute backend - Apple Metal
//!
//! Offloads candidate evaluation to a massively parallel HMAC-SHA256
//! kernel: the signing input, the expected signature, and a fixed-stride
//! arena of every candidate secret go up in one transfer, and a single
//! lowest-matching-lane index comes back.
//!
//! ```text
//! CPU (host)                    GPU (per lane)
//! ─────────────────            ─────────────────────────────
//! candidate arena    ───────>  HMAC-SHA256(key, signing input)
//! signing input                 ↓
//! expected signature            digest == expected signature?
//!                               ↓
//! lowest lane index  <───────  atomic_fetch_min(found, lane)
//! ```
//!
//! Cancellation is batch-granular: a dispatched batch always runs to
//! completion, the cancellation flag only prevents the next dispatch.

mod batch;
mod gpu;

pub use batch::BatchComputeBackend;
pub use gpu::{GpuOracle, MAX_SECRET_LEN, SECRET_STRIDE};

/// Check if a Metal GPU is available on this system
pub fn is_gpu_available() -> bool {
    metal::Device::system_default().is_some()
}
