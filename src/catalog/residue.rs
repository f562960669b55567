use serde::{Deserialize, Serialize};

/// 侧链极性分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Nonpolar,
    Polar,
    Positive,
    Negative,
}

impl Polarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Polarity::Nonpolar => "nonpolar",
            Polarity::Polar => "polar",
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个氨基酸残基及其物化属性
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Residue {
    /// 单字母代码（目录内唯一）
    pub code: char,
    /// 质量（Da）
    pub mass: f64,
    /// Kyte-Doolittle 疏水性
    pub hydrophobicity: f64,
    pub polarity: Polarity,
}

impl Residue {
    pub const fn new(code: char, mass: f64, hydrophobicity: f64, polarity: Polarity) -> Self {
        Self { code, mass, hydrophobicity, polarity }
    }

    #[inline]
    pub fn is_nonpolar(&self) -> bool {
        self.polarity == Polarity::Nonpolar
    }
}

use Polarity::{Negative, Nonpolar, Polar, Positive};

/// 参考目录：20 种标准氨基酸
pub const REFERENCE_RESIDUES: [Residue; 20] = [
    Residue::new('A', 89.0, 1.8, Nonpolar),
    Residue::new('C', 121.0, 2.5, Polar),
    Residue::new('D', 133.0, -3.5, Negative),
    Residue::new('E', 147.0, -3.5, Negative),
    Residue::new('F', 165.0, 2.8, Nonpolar),
    Residue::new('G', 75.0, -0.4, Nonpolar),
    Residue::new('H', 155.0, -3.2, Positive),
    Residue::new('I', 131.0, 4.5, Nonpolar),
    Residue::new('K', 146.0, -3.9, Positive),
    Residue::new('L', 131.0, 3.8, Nonpolar),
    Residue::new('M', 149.0, 1.9, Nonpolar),
    Residue::new('N', 132.0, -3.5, Polar),
    Residue::new('P', 115.0, -1.6, Nonpolar),
    Residue::new('Q', 146.0, -3.5, Polar),
    Residue::new('R', 174.0, -4.5, Positive),
    Residue::new('S', 105.0, -0.8, Polar),
    Residue::new('T', 119.0, -0.7, Polar),
    Residue::new('V', 117.0, 4.2, Nonpolar),
    Residue::new('W', 204.0, -0.9, Nonpolar),
    Residue::new('Y', 181.0, -1.3, Polar),
];
