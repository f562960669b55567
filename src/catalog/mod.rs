pub mod residue;

pub use residue::{Polarity, Residue, REFERENCE_RESIDUES};

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, ScanError};

/// 不可变残基目录。
///
/// - 残基按代码的标量值显式排序后存储，排序结果即枚举字母表，不依赖任何 map 的迭代顺序。
/// - 构建后只读，可被任意多个读者共享（`&Catalog` 为 `Sync`）。
#[derive(Debug, Clone)]
pub struct Catalog {
    /// 按代码升序排列
    residues: Vec<Residue>,
    alphabet: Vec<char>,
    /// code -> residues 下标
    index: HashMap<char, usize>,
}

impl Catalog {
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Residue>,
    {
        let mut residues: Vec<Residue> = entries.into_iter().collect();
        if residues.is_empty() {
            return Err(ScanError::InvalidCatalog("catalog has no residues".to_string()));
        }

        for r in &residues {
            if !r.mass.is_finite() || r.mass <= 0.0 {
                return Err(ScanError::InvalidCatalog(format!(
                    "residue '{}' has non-positive mass {}",
                    r.code, r.mass
                )));
            }
            if !r.hydrophobicity.is_finite() {
                return Err(ScanError::InvalidCatalog(format!(
                    "residue '{}' has non-finite hydrophobicity",
                    r.code
                )));
            }
        }

        residues.sort_unstable_by_key(|r| u32::from(r.code));
        if let Some(w) = residues.windows(2).find(|w| w[0].code == w[1].code) {
            return Err(ScanError::InvalidCatalog(format!("duplicate residue code '{}'", w[0].code)));
        }

        let alphabet: Vec<char> = residues.iter().map(|r| r.code).collect();
        let index = alphabet.iter().enumerate().map(|(i, &c)| (c, i)).collect();

        Ok(Self { residues, alphabet, index })
    }

    /// 20 种标准氨基酸构成的参考目录
    pub fn reference() -> Self {
        Self::new(REFERENCE_RESIDUES).expect("reference residue table is well-formed")
    }

    /// 从 CSV 文件加载目录（列：code,mass,hydrophobicity,polarity）
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::io::csv::read_catalog_path(path)
    }

    pub fn get(&self, code: char) -> Result<&Residue> {
        self.index_of(code).map(|i| &self.residues[i])
    }

    pub fn index_of(&self, code: char) -> Result<usize> {
        self.index.get(&code).copied().ok_or(ScanError::UnknownResidue(code))
    }

    #[inline]
    pub fn residue_at(&self, idx: usize) -> &Residue {
        &self.residues[idx]
    }

    /// 升序字母表，即枚举基
    pub fn sorted_alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// 按字母表顺序排列的残基
    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}
