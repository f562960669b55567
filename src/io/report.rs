use std::io::Write;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::scan::{Candidate, Constraints, SearchStats};

/// 扫描开始前的参数说明
pub fn write_banner<W: Write>(out: &mut W, k: usize, max_results: usize, c: &Constraints) -> Result<()> {
    writeln!(out, "Generating peptides of length {} (first {} candidates)...", k, max_results)?;
    writeln!(out, "Constraints:")?;
    writeln!(out, "- Mass: {}-{} Da", c.mass_min, c.mass_max)?;
    writeln!(out, "- Avg hydrophobicity > {}", c.min_hydrophobicity)?;
    writeln!(out, "- <={} consecutive repeats", c.max_run)?;
    writeln!(out, "- <={}% nonpolar amino acids", c.max_nonpolar_ratio * 100.0)?;
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, stats: &SearchStats) -> Result<()> {
    writeln!(out, "COMPLETED IN {:.2}s", stats.elapsed.as_secs_f64())?;
    match stats.total_possible {
        Some(n) => writeln!(out, "Total possible sequences: {}", group_thousands(n))?,
        None => writeln!(out, "Total possible sequences: > {}", group_thousands(u128::MAX))?,
    }
    writeln!(out, "Sequences evaluated: {}", group_thousands(u128::from(stats.evaluated)))?;
    writeln!(out, "Valid peptides found: {}", stats.valid_count)?;
    writeln!(out, "Validation ratio: {:.2}%", stats.validation_percent())?;
    Ok(())
}

/// 前 `top` 条候选的对齐表格
pub fn write_table<W: Write>(out: &mut W, candidates: &[Candidate], top: usize) -> Result<()> {
    if candidates.is_empty() {
        writeln!(out, "(no candidates)")?;
        return Ok(());
    }
    let width = candidates.iter().map(|c| c.sequence.len()).max().unwrap_or(0).max("sequence".len());
    writeln!(
        out,
        "{:>4}  {:<width$}  {:>9}  {:>14}  {:>14}",
        "",
        "sequence",
        "mass",
        "hydrophobicity",
        "nonpolar_ratio",
        width = width
    )?;
    for (i, c) in candidates.iter().take(top).enumerate() {
        writeln!(
            out,
            "{:>4}  {:<width$}  {:>9}  {:>14.2}  {:>14.2}",
            i,
            c.sequence,
            c.mass,
            c.hydrophobicity,
            c.nonpolar_ratio,
            width = width
        )?;
    }
    Ok(())
}

pub fn write_alphabet<W: Write>(out: &mut W, catalog: &Catalog) -> Result<()> {
    let codes: Vec<String> = catalog.sorted_alphabet().iter().map(char::to_string).collect();
    writeln!(out, "Available amino acids: {}", codes.join(", "))?;
    for r in catalog.residues() {
        writeln!(out, "  {}  {:>7.2} Da  {:>5.1}  {}", r.code, r.mass, r.hydrophobicity, r.polarity)?;
    }
    Ok(())
}

/// 1280000000 -> "1,280,000,000"
pub fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
