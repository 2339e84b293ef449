use std::path::PathBuf;
use std::process;
use std::thread;

use clap::{Parser, ValueEnum};

use jwtcrack::search::thread::ThreadBackend;
use jwtcrack::search::ExecutionBackend;
use jwtcrack::{inspect, reader, report, search, token, Result, SearchOutcome};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum BackendChoice {
    /// CPU parallel, one worker per partition
    Thread,
    /// GPU batch compute (requires the `gpu` build feature and a device)
    Gpu,
}

/// Brute-force the HMAC-SHA256 secret of a compact JWT.
///
/// Tests every candidate from a wordlist against the token's signature
/// and reports the first match. The signing algorithm is always
/// HMAC-SHA256, never read from the token header.
#[derive(Parser)]
#[command(name = "jwtcrack")]
struct Args {
    /// File containing the token on its first line
    token: PathBuf,

    /// Wordlist with one candidate secret per line
    #[arg(required_unless_present = "inspect")]
    wordlist: Option<PathBuf>,

    /// Decode and print the token's header and payload claims, then exit
    #[arg(long)]
    inspect: bool,

    /// Execution backend
    #[arg(long, value_enum, default_value = "thread")]
    backend: BackendChoice,

    /// Worker thread count [default: CPU core count]
    #[arg(long, short = 't')]
    threads: Option<usize>,
}

#[cfg(feature = "gpu")]
fn gpu_search(
    candidates: &[Vec<u8>],
    target: &token::CrackTarget,
) -> Result<SearchOutcome> {
    let backend = jwtcrack::metal::BatchComputeBackend::new()?;
    report::preamble(target, candidates.len(), backend.name());
    search(candidates, target, &backend)
}

#[cfg(not(feature = "gpu"))]
fn gpu_search(
    _candidates: &[Vec<u8>],
    _target: &token::CrackTarget,
) -> Result<SearchOutcome> {
    Err(jwtcrack::Error::BackendUnavailable {
        backend: "batch-compute",
        reason: "built without the `gpu` feature".to_string(),
    })
}

fn run(args: &Args) -> Result<()> {
    let token = reader::read_token(&args.token)?;

    if args.inspect {
        print!("{}", inspect::describe(&token)?);
        return Ok(());
    }

    let target = token::canonicalize(&token)?;
    let Some(wordlist) = args.wordlist.as_deref() else {
        return Ok(());
    };
    let candidates = reader::load_wordlist(wordlist)?;

    let outcome = match args.backend {
        BackendChoice::Thread => {
            let threads = args.threads.unwrap_or_else(|| {
                thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
            });
            let backend = ThreadBackend::new(threads);
            report::preamble(&target, candidates.len(), backend.name());
            search(&candidates, &target, &backend)?
        }
        BackendChoice::Gpu => gpu_search(&candidates, &target)?,
    };

    report::summary(&outcome);
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}
