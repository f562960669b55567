//! 演示如何在 library 模式下使用 peptide-scan 生成候选肽。
//!
//! 运行方式：
//! ```bash
//! cargo run --example simple_scan
//! ```

use peptide_scan::catalog::{Catalog, Polarity, Residue};
use peptide_scan::io::report;
use peptide_scan::scan::{self, Constraints, PeptideGenerator};

fn main() -> anyhow::Result<()> {
    // 1. 参考目录与字母表
    let catalog = Catalog::reference();
    let alphabet: String = catalog.sorted_alphabet().iter().collect();
    println!("字母表: {} ({} 种残基)", alphabet, catalog.len());

    // 2. 默认约束下的前 10 条候选
    let (candidates, stats) = scan::generate_peptides(&catalog, 7, 10)?;
    let mut out = std::io::stdout().lock();
    report::write_summary(&mut out, &stats)?;
    report::write_table(&mut out, &candidates, 10)?;

    // 3. 单条序列求值
    let gen = PeptideGenerator::new(&catalog);
    for seq in ["AACACCD", "KKKLLLW", "DEDEDK"] {
        match gen.evaluate(seq)? {
            Some(c) => println!("\n{} 通过: mass={} hydro={} nonpolar={}", seq, c.mass, c.hydrophobicity, c.nonpolar_ratio),
            None => println!("\n{} 未通过", seq),
        }
    }

    // 4. 自定义三残基目录：质量上限 399 Da，永远达不到 500 Da
    let tiny = Catalog::new(vec![
        Residue::new('A', 89.0, 1.8, Polarity::Nonpolar),
        Residue::new('C', 121.0, 2.5, Polarity::Polar),
        Residue::new('D', 133.0, -3.5, Polarity::Negative),
    ])?;
    let (none, stats) = scan::generate_peptides(&tiny, 3, 10)?;
    println!("\n{{A,C,D}} k=3: 找到 {} 条，共 {:?} 种序列", none.len(), stats.total_possible);

    // 5. 放宽约束后并行扫描
    let loose = Constraints { mass_min: 0.0, min_hydrophobicity: -10.0, max_nonpolar_ratio: 1.0, ..Constraints::default() };
    let gen = PeptideGenerator::with_constraints(&tiny, loose)?;
    let (all, stats) = gen.generate_parallel(3, 100)?;
    println!("放宽约束后: {} 条，停止原因 {:?}", all.len(), stats.halt);

    println!("\n完成！");
    Ok(())
}
