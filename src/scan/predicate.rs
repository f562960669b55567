use crate::catalog::Residue;
use crate::error::{Result, ScanError};

/// 候选肽的物化约束。均为配置，而非生物学事实。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    /// 总质量闭区间下界（Da）
    pub mass_min: f64,
    /// 总质量闭区间上界（Da）
    pub mass_max: f64,
    /// 平均疏水性须严格大于该值
    pub min_hydrophobicity: f64,
    /// 非极性残基比例上限（含）
    pub max_nonpolar_ratio: f64,
    /// 同一残基最多允许连续出现的次数
    pub max_run: usize,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            mass_min: 500.0,
            mass_max: 2000.0,
            min_hydrophobicity: 1.0,
            max_nonpolar_ratio: 0.5,
            max_run: 2,
        }
    }
}

/// 第一个未通过的条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    RunLength,
    Mass,
    Hydrophobicity,
    NonpolarRatio,
}

impl Constraints {
    pub fn validate(&self) -> Result<()> {
        if !self.mass_min.is_finite() || !self.mass_max.is_finite() {
            return Err(ScanError::invalid_parameter("mass window", "bounds must be finite"));
        }
        if self.mass_min > self.mass_max {
            return Err(ScanError::invalid_parameter(
                "mass window",
                format!("lower bound {} exceeds upper bound {}", self.mass_min, self.mass_max),
            ));
        }
        if !self.min_hydrophobicity.is_finite() {
            return Err(ScanError::invalid_parameter("min_hydrophobicity", "must be finite"));
        }
        if !(0.0..=1.0).contains(&self.max_nonpolar_ratio) {
            return Err(ScanError::invalid_parameter(
                "max_nonpolar_ratio",
                format!("{} is outside [0, 1]", self.max_nonpolar_ratio),
            ));
        }
        if self.max_run == 0 {
            return Err(ScanError::invalid_parameter("max_run", "must be at least 1"));
        }
        Ok(())
    }

    /// 按固定顺序依次检查：连续重复、质量、疏水性、非极性比例，遇到第一个失败即返回。
    pub fn check(&self, seq: &[Residue]) -> std::result::Result<(), Rejection> {
        let codes = seq.iter().map(|r| r.code);
        if first_run_violation(codes, self.max_run).is_some() {
            return Err(Rejection::RunLength);
        }
        self.check_properties(seq)
    }

    /// 只检查质量 / 疏水性 / 非极性比例（调用方已排除连续重复）
    pub fn check_properties(&self, seq: &[Residue]) -> std::result::Result<(), Rejection> {
        let mass: f64 = seq.iter().map(|r| r.mass).sum();
        if mass < self.mass_min || mass > self.mass_max {
            return Err(Rejection::Mass);
        }

        let n = seq.len() as f64;
        let hydro = seq.iter().map(|r| r.hydrophobicity).sum::<f64>() / n;
        if hydro <= self.min_hydrophobicity {
            return Err(Rejection::Hydrophobicity);
        }

        let nonpolar = seq.iter().filter(|r| r.is_nonpolar()).count() as f64;
        if nonpolar / n > self.max_nonpolar_ratio {
            return Err(Rejection::NonpolarRatio);
        }
        Ok(())
    }

    pub fn is_valid(&self, seq: &[Residue]) -> bool {
        self.check(seq).is_ok()
    }
}

/// 返回第一个使连续相同元素数超过 `max_run` 的位置。
/// 序列长度不超过 `max_run` 时永远返回 None。
pub fn first_run_violation<T, I>(items: I, max_run: usize) -> Option<usize>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    let mut prev: Option<T> = None;
    let mut run = 0usize;
    for (i, item) in items.into_iter().enumerate() {
        if prev.as_ref() == Some(&item) {
            run += 1;
        } else {
            run = 1;
        }
        if run > max_run {
            return Some(i);
        }
        prev = Some(item);
    }
    None
}
