use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dna_automata::io::fasta;
use dna_automata::report::{self, TsvSink};
use dna_automata::scan::{ScanOpt, SequenceProcessor};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "dna-automata", author, version, about = "DNA motif search using finite automata", arg_required_else_help = true)]
struct Cli {
    /// Input FASTA file
    #[arg(long)]
    input: String,
    /// DNA motif to search for (case-insensitive)
    #[arg(long)]
    motif: String,
    /// Output directory for results
    #[arg(short, long, default_value = "results")]
    output: String,
    /// Worker threads (0 = one per CPU)
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    threads: usize,
    /// Number of bins in the position distribution
    #[arg(long = "histogram-bins", default_value_t = 50)]
    histogram_bins: usize,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("DNA_AUTOMATA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    if cli.threads != 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("cannot configure thread pool")?;
    }

    println!("Loading sequences from {}...", cli.input);
    let sequences = fasta::load_sequences(&cli.input)?;
    println!("sequences: {}", sequences.len());

    let motif = cli.motif.trim().to_ascii_uppercase();
    println!("Searching for motif '{}'...", motif);
    let mut processor = SequenceProcessor::new().with_opt(ScanOpt { threads: cli.threads });
    let scan = processor
        .scan_batch(&sequences, motif.as_bytes())
        .with_context(|| format!("invalid motif '{}'", cli.motif))?;

    println!("windows: {}", scan.total_windows());
    println!("matches: {}", scan.total_matches());
    println!("frequency: {:.6}", scan.frequency());

    let mut sink = TsvSink::create(&cli.output, cli.histogram_bins)?;
    report::emit(&scan, &mut sink)?;
    println!("Analysis complete. Results saved to {}", sink.dir().display());
    Ok(())
}
