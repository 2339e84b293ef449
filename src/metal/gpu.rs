//! Metal device handling for the HMAC-SHA256 crack kernel.

use metal::{
    Buffer, CommandQueue, ComputePipelineState, Device, MTLResourceOptions, MTLSize,
};

use crate::error::{Error, Result};
use crate::token::CrackTarget;

/// Metal shader source - embedded at compile time
const SHADER_SOURCE: &str = include_str!("hmac_sha256.metal");

/// Maximum secret length the kernel evaluates. 64 bytes is the
/// HMAC-SHA256 block size, so every candidate at or under this limit
/// hashes exactly as it would on the CPU. Longer candidates are
/// truncated to this width: a documented precision limit, not an error.
pub const MAX_SECRET_LEN: usize = 64;

/// Stride per secret in the candidate arena: 16-byte aligned header
/// ([length:1][padding:15]) followed by MAX_SECRET_LEN key bytes.
/// 16-byte alignment keeps GPU memory accesses coalesced.
pub const SECRET_STRIDE: usize = 16 + MAX_SECRET_LEN;

/// Kernel sentinel meaning "no lane matched".
const NO_MATCH_SENTINEL: u32 = u32::MAX;

fn unavailable(reason: impl Into<String>) -> Error {
    Error::BackendUnavailable {
        backend: "batch-compute",
        reason: reason.into(),
    }
}

/// Lanes per dispatch, sized from the device's recommended working set.
fn dispatch_width(device: &Device) -> usize {
    let gpu_mem_mb = device.recommended_max_working_set_size() / (1024 * 1024);
    if gpu_mem_mb >= 80_000 {
        262_144
    } else if gpu_mem_mb >= 40_000 {
        131_072
    } else if gpu_mem_mb >= 18_000 {
        65_536
    } else {
        32_768
    }
}

/// GPU verification oracle: one synchronous HMAC-SHA256 sweep per call.
pub struct GpuOracle {
    device: Device,
    pipeline: ComputePipelineState,
    queue: CommandQueue,
    max_batch: usize,
    threadgroup_size: usize,

    // Buffers reused across dispatches
    secrets_buffer: Buffer,
    params_buffer: Buffer,
    found_buffer: Buffer,
}

// Metal types are thread-safe on Apple Silicon
unsafe impl Send for GpuOracle {}
unsafe impl Sync for GpuOracle {}

impl GpuOracle {
    /// Initialize the device, compile the kernel, allocate buffers.
    /// Any failure here is `BackendUnavailable`; the caller never falls
    /// back to another backend on its own.
    pub fn new() -> Result<Self> {
        let device = Device::system_default().ok_or_else(|| unavailable("no Metal device found"))?;

        println!("🖥  GPU: {}", device.name());

        let library = device
            .new_library_with_source(SHADER_SOURCE, &metal::CompileOptions::new())
            .map_err(|e| unavailable(format!("failed to compile kernel: {e}")))?;

        let function = library
            .get_function("hmac_sha256_crack", None)
            .map_err(|e| unavailable(format!("failed to get kernel function: {e}")))?;

        let pipeline = device
            .new_compute_pipeline_state_with_function(&function)
            .map_err(|e| unavailable(format!("failed to create pipeline: {e}")))?;

        let queue = device.new_command_queue();

        let max_batch = dispatch_width(&device);
        let threadgroup_size = 256.min(pipeline.max_total_threads_per_threadgroup() as usize);

        let storage = MTLResourceOptions::StorageModeShared;
        let secrets_buffer = device.new_buffer((max_batch * SECRET_STRIDE) as u64, storage);
        let params_buffer = device.new_buffer(12, storage); // [msg_len, sig_len, count] u32
        let found_buffer = device.new_buffer(4, storage);

        println!("   Lanes per dispatch: {max_batch}");

        Ok(Self {
            device,
            pipeline,
            queue,
            max_batch,
            threadgroup_size,
            secrets_buffer,
            params_buffer,
            found_buffer,
        })
    }

    /// Maximum secrets per dispatch
    pub fn max_batch_size(&self) -> usize {
        self.max_batch
    }

    /// Evaluate one batch of secrets against the target in a single
    /// synchronous kernel dispatch. Returns the lowest matching lane
    /// index within the batch, if any lane matched.
    pub fn dispatch(&self, target: &CrackTarget, secrets: &[Vec<u8>]) -> Result<Option<usize>> {
        if secrets.is_empty() {
            return Ok(None);
        }

        // The kernel produces 32-byte digests; a signature of any other
        // width can never match, same as on the CPU path.
        if target.expected_signature.len() != 32 {
            return Ok(None);
        }

        let count = secrets.len().min(self.max_batch);
        let message = target.signing_input.as_bytes();

        // Pack secrets into the arena: [len:1][pad:15][key:64] per lane.
        unsafe {
            let arena = self.secrets_buffer.contents() as *mut u8;

            for (i, secret) in secrets.iter().take(count).enumerate() {
                let offset = i * SECRET_STRIDE;
                let len = secret.len().min(MAX_SECRET_LEN);

                *arena.add(offset) = len as u8;
                std::ptr::write_bytes(arena.add(offset + 1), 0, 15);
                std::ptr::copy_nonoverlapping(secret.as_ptr(), arena.add(offset + 16), len);
                if len < MAX_SECRET_LEN {
                    std::ptr::write_bytes(arena.add(offset + 16 + len), 0, MAX_SECRET_LEN - len);
                }
            }

            let params = self.params_buffer.contents() as *mut u32;
            *params = message.len() as u32;
            *params.add(1) = target.expected_signature.len() as u32;
            *params.add(2) = count as u32;

            let found = self.found_buffer.contents() as *mut u32;
            *found = NO_MATCH_SENTINEL;
        }

        let storage = MTLResourceOptions::StorageModeShared;
        let message_buffer = self.device.new_buffer_with_data(
            message.as_ptr() as *const std::ffi::c_void,
            message.len() as u64,
            storage,
        );
        let signature_buffer = self.device.new_buffer_with_data(
            target.expected_signature.as_ptr() as *const std::ffi::c_void,
            target.expected_signature.len() as u64,
            storage,
        );

        // Dispatch GPU kernel
        let command_buffer = self.queue.new_command_buffer();
        let encoder = command_buffer.new_compute_command_encoder();

        encoder.set_compute_pipeline_state(&self.pipeline);
        encoder.set_buffer(0, Some(&message_buffer), 0);
        encoder.set_buffer(1, Some(&self.secrets_buffer), 0);
        encoder.set_buffer(2, Some(&signature_buffer), 0);
        encoder.set_buffer(3, Some(&self.params_buffer), 0);
        encoder.set_buffer(4, Some(&self.found_buffer), 0);

        let grid_size = MTLSize::new(count as u64, 1, 1);
        let threadgroup_size = MTLSize::new(self.threadgroup_size as u64, 1, 1);

        encoder.dispatch_threads(grid_size, threadgroup_size);
        encoder.end_encoding();

        command_buffer.commit();
        command_buffer.wait_until_completed();

        if command_buffer.status() == metal::MTLCommandBufferStatus::Error {
            return Err(unavailable("GPU command buffer failed"));
        }

        let found = unsafe { *(self.found_buffer.contents() as *const u32) };
        if found != NO_MATCH_SENTINEL && (found as usize) < count {
            Ok(Some(found as usize))
        } else {
            Ok(None)
        }
    }
}
