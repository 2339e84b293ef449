//! Token and wordlist loading.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use memmap2::Mmap;
use rayon::prelude::*;

use crate::error::Result;

/// Read the token from the first line of a file.
pub fn read_token(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Load candidate secrets from a wordlist, one per line, in file order.
///
/// Only line endings are stripped; interior and edge whitespace is part
/// of the secret. Empty lines are skipped.
pub fn load_wordlist(path: &Path) -> Result<Vec<Vec<u8>>> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };

    let size_mb = mmap.len() as f64 / 1_048_576.0;
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("loading wordlist ({size_mb:.1} MB)..."));
    pb.enable_steady_tick(Duration::from_millis(80));

    let candidates: Vec<Vec<u8>> = mmap
        .par_split(|&b| b == b'\n')
        .filter_map(|line| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if line.is_empty() {
                None
            } else {
                Some(line.to_vec())
            }
        })
        .collect();

    pb.finish_with_message(format!("loaded {} candidates", candidates.len()));
    Ok(candidates)
}
