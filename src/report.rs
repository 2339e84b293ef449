//! Operator-facing run reporting.

use crate::search::{SearchOutcome, Verdict};
use crate::token::CrackTarget;

/// Print the per-run preamble before the search starts.
pub fn preamble(target: &CrackTarget, candidates: usize, backend: &str) {
    println!(
        "🔐 Token signature: {} bytes ({})",
        target.expected_signature.len(),
        hex::encode(&target.expected_signature)
    );
    println!("🗄  Candidates to test: {}", format_count(candidates as u64));
    println!("🚀 Starting {backend} brute-force...");
}

/// Print the final summary: attempts, wall time, throughput, outcome.
pub fn summary(outcome: &SearchOutcome) {
    let secs = outcome.elapsed.as_secs_f64();

    println!("\n🔢 Total attempts: {}", format_count(outcome.attempts));
    println!("⏱  Time elapsed: {secs:.3} s");
    if secs > 0.0 {
        let rate = (outcome.attempts as f64 / secs) as u64;
        println!("⚡ Hashes/sec: {}", format_count(rate));
    }

    match &outcome.verdict {
        Verdict::Found { secret, index } => {
            println!("✅ Secret FOUND: \"{secret}\" at index {index}");
        }
        Verdict::Exhausted => {
            println!("❌ No matching secret found.");
        }
    }
}

fn format_count(n: u64) -> String {
    let s = n.to_string();
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, &b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(b as char);
    }
    result
}
