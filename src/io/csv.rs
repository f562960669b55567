use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::catalog::{Catalog, Residue};
use crate::error::Result;
use crate::scan::Candidate;

/// 将候选按给定顺序写成 CSV（表头：sequence,mass,hydrophobicity,nonpolar_ratio）
pub fn write_candidates<W: Write>(writer: W, candidates: &[Candidate]) -> Result<()> {
    let mut w = ::csv::Writer::from_writer(writer);
    for c in candidates {
        w.serialize(c)?;
    }
    // 空结果也要写表头
    if candidates.is_empty() {
        w.write_record(["sequence", "mass", "hydrophobicity", "nonpolar_ratio"])?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_candidates_path<P: AsRef<Path>>(path: P, candidates: &[Candidate]) -> Result<()> {
    let f = File::create(path)?;
    write_candidates(std::io::BufWriter::new(f), candidates)
}

/// 读取残基目录（列：code,mass,hydrophobicity,polarity）
pub fn read_catalog<R: Read>(reader: R) -> Result<Catalog> {
    let mut rdr = ::csv::ReaderBuilder::new().trim(::csv::Trim::All).from_reader(reader);
    let residues = rdr.deserialize::<Residue>().collect::<std::result::Result<Vec<_>, _>>()?;
    Catalog::new(residues)
}

pub fn read_catalog_path<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let f = File::open(path)?;
    read_catalog(std::io::BufReader::new(f))
}

/// 按字母表顺序导出目录，格式与 `read_catalog` 相同
pub fn write_catalog<W: Write>(writer: W, catalog: &Catalog) -> Result<()> {
    let mut w = ::csv::Writer::from_writer(writer);
    for r in catalog.residues() {
        w.serialize(r)?;
    }
    w.flush()?;
    Ok(())
}
