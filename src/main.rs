use std::io::Write;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;

use peptide_scan::catalog::Catalog;
use peptide_scan::io::{self, report};
use peptide_scan::logging;
use peptide_scan::scan::{Candidate, Constraints, PeptideGenerator, ScanControl, ScanObserver, SearchStats};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "peptide-scan", author, version, about = "Antimicrobial peptide candidate generator", arg_required_else_help = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Silence all log output
    #[arg(short, long, global = true)]
    quiet: bool,
    /// Also write logs to this file
    #[arg(long = "log-file", global = true)]
    log_file: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Enumerate peptides in lexicographic order and export the first valid candidates
    Generate {
        /// Peptide length
        #[arg(short = 'k', long = "length", default_value_t = 7)]
        length: usize,
        /// Stop after this many valid candidates
        #[arg(short = 'n', long = "max-results", default_value_t = 50)]
        max_results: usize,
        #[arg(long = "mass-min", default_value_t = 500.0)]
        mass_min: f64,
        #[arg(long = "mass-max", default_value_t = 2000.0)]
        mass_max: f64,
        #[arg(long = "min-hydrophobicity", default_value_t = 1.0, allow_hyphen_values = true)]
        min_hydrophobicity: f64,
        #[arg(long = "max-nonpolar-ratio", default_value_t = 0.5)]
        max_nonpolar_ratio: f64,
        #[arg(long = "max-run", default_value_t = 2)]
        max_run: usize,
        /// Residue catalog CSV (code,mass,hydrophobicity,polarity); built-in table if omitted
        #[arg(long)]
        catalog: Option<String>,
        /// Output CSV path (default: peptide_candidates_k{length}.csv)
        #[arg(short, long)]
        out: Option<String>,
        /// Number of candidates shown on screen
        #[arg(long, default_value_t = 10)]
        top: usize,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
    /// Print the residue alphabet in enumeration order
    Alphabet {
        #[arg(long)]
        catalog: Option<String>,
        /// Write the catalog as CSV instead of printing it
        #[arg(long)]
        export: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref().map(std::path::Path::new))?;

    match cli.command {
        Commands::Generate {
            length,
            max_results,
            mass_min,
            mass_max,
            min_hydrophobicity,
            max_nonpolar_ratio,
            max_run,
            catalog,
            out,
            top,
            threads,
        } => {
            let constraints = Constraints {
                mass_min,
                mass_max,
                min_hydrophobicity,
                max_nonpolar_ratio,
                max_run,
            };
            let catalog = load_catalog(catalog.as_deref())?;
            let out_path = out.unwrap_or_else(|| format!("peptide_candidates_k{}.csv", length));
            run_generate(&catalog, constraints, length, max_results, &out_path, top, threads)
        }
        Commands::Alphabet { catalog, export } => run_alphabet(catalog.as_deref(), export.as_deref()),
    }
}

fn load_catalog(path: Option<&str>) -> Result<Catalog> {
    match path {
        Some(p) => Catalog::from_csv_path(p).map_err(|e| anyhow!("cannot load residue catalog '{}': {}", p, e)),
        None => Ok(Catalog::reference()),
    }
}

/// 每评估一定数量的序列输出一条进度日志
struct ProgressLog {
    every: u64,
}

impl ScanObserver for ProgressLog {
    fn on_candidate(&mut self, candidate: &Candidate, found: usize) -> ScanControl {
        tracing::debug!(found, sequence = %candidate.sequence, "candidate");
        ScanControl::Continue
    }

    fn on_evaluated(&mut self, evaluated: u64) -> ScanControl {
        if evaluated % self.every == 0 {
            info!(evaluated, "scan progress");
        }
        ScanControl::Continue
    }
}

fn run_generate(
    catalog: &Catalog,
    constraints: Constraints,
    k: usize,
    max_results: usize,
    out_path: &str,
    top: usize,
    threads: usize,
) -> Result<()> {
    let gen = PeptideGenerator::with_constraints(catalog, constraints)?;
    info!(
        k,
        max_results,
        threads,
        started_at = %chrono::Utc::now().to_rfc3339(),
        "peptide generation run"
    );

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "=== ANTIMICROBIAL PEPTIDE DESIGN TOOL ===")?;
    report::write_alphabet(&mut stdout, catalog)?;
    writeln!(stdout)?;
    report::write_banner(&mut stdout, k, max_results, gen.constraints())?;
    writeln!(stdout)?;

    let (candidates, stats): (Vec<Candidate>, SearchStats) = if threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| anyhow!("cannot build thread pool: {}", e))?;
        pool.install(|| gen.generate_parallel(k, max_results))?
    } else {
        gen.generate_with_observer(k, max_results, &mut ProgressLog { every: 10_000_000 })?
    };

    report::write_summary(&mut stdout, &stats)?;
    writeln!(stdout)?;
    writeln!(stdout, "TOP CANDIDATES:")?;
    report::write_table(&mut stdout, &candidates, top)?;

    io::csv::write_candidates_path(out_path, &candidates)
        .map_err(|e| anyhow!("cannot write results to '{}': {}", out_path, e))?;
    writeln!(stdout)?;
    writeln!(stdout, "Results saved to '{}'", out_path)?;
    Ok(())
}

fn run_alphabet(catalog: Option<&str>, export: Option<&str>) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    match export {
        Some(path) => {
            let f = std::fs::File::create(path).map_err(|e| anyhow!("cannot create '{}': {}", path, e))?;
            io::csv::write_catalog(std::io::BufWriter::new(f), &catalog)?;
            println!("catalog with {} residues saved: {}", catalog.len(), path);
        }
        None => report::write_alphabet(&mut std::io::stdout().lock(), &catalog)?,
    }
    Ok(())
}
