use std::time::Duration;

use serde::Serialize;

use crate::catalog::Residue;

/// 通过全部约束的候选肽及其派生指标
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub sequence: String,
    /// 残基质量之和（Da）
    pub mass: f64,
    /// 平均疏水性，保留两位小数
    pub hydrophobicity: f64,
    /// 非极性残基比例，保留两位小数
    pub nonpolar_ratio: f64,
}

impl Candidate {
    pub fn from_residues(seq: &[Residue]) -> Self {
        let n = seq.len() as f64;
        let sequence: String = seq.iter().map(|r| r.code).collect();
        let mass = seq.iter().map(|r| r.mass).sum();
        let hydro = seq.iter().map(|r| r.hydrophobicity).sum::<f64>() / n;
        let nonpolar = seq.iter().filter(|r| r.is_nonpolar()).count() as f64 / n;
        Self {
            sequence,
            mass,
            hydrophobicity: round2(hydro),
            nonpolar_ratio: round2(nonpolar),
        }
    }
}

/// 扫描停止的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// 结果数达到上限
    CapReached,
    /// 笛卡尔积已枚举完毕
    Exhausted,
    /// 观察者要求停止
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
    pub k: usize,
    pub max_results: usize,
    pub elapsed: Duration,
    /// alphabet_size^k；超出 u128 时为 None
    pub total_possible: Option<u128>,
    pub valid_count: usize,
    /// 实际执行判定的序列数（被前缀剪枝跳过的不计）
    pub evaluated: u64,
    pub halt: HaltReason,
}

impl SearchStats {
    /// valid_count / max_results。
    ///
    /// 注意这是结果上限的填充率，而不是命中率：上限提前填满时它恒为 1。
    pub fn validation_ratio(&self) -> f64 {
        if self.max_results == 0 {
            return 0.0;
        }
        self.valid_count as f64 / self.max_results as f64
    }

    /// 百分比形式，保留两位小数
    pub fn validation_percent(&self) -> f64 {
        round2(self.validation_ratio() * 100.0)
    }
}

pub fn total_possible_sequences(alphabet_size: usize, k: usize) -> Option<u128> {
    let exp = u32::try_from(k).ok()?;
    (alphabet_size as u128).checked_pow(exp)
}

#[inline]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
