//! # peptide-scan
//!
//! 抗菌肽候选序列的组合枚举与物化过滤工具。
//!
//! 本 crate 在固定氨基酸字母表上按字典序枚举定长肽序列，依次检查：
//!
//! - **连续重复**：同一残基不得连续出现 3 次及以上
//! - **质量窗口**：总质量落在 [500, 2000] Da
//! - **疏水性**：平均疏水性 > 1.0
//! - **非极性比例**：非极性残基占比 ≤ 50%
//!
//! 收集到前 N 条合格序列即停止，并给出派生指标与搜索统计。
//!
//! ## 快速示例
//!
//! ```rust
//! use peptide_scan::catalog::Catalog;
//! use peptide_scan::scan;
//!
//! let catalog = Catalog::reference();
//! let (candidates, stats) = scan::generate_peptides(&catalog, 7, 10).unwrap();
//! assert_eq!(candidates[0].sequence, "AACACCD");
//! assert_eq!(stats.total_possible, Some(20u128.pow(7)));
//! ```
//!
//! ## 模块说明
//!
//! - [`catalog`] — 残基属性与不可变目录
//! - [`scan`] — 字典序计数器、约束判定、候选生成（含并行版本）
//! - [`io`] — CSV 导出 / 目录导入、文本报告
//! - [`logging`] — tracing 日志初始化
//! - [`error`] — 错误类型

pub mod catalog;
pub mod error;
pub mod io;
pub mod logging;
pub mod scan;

pub use catalog::{Catalog, Polarity, Residue};
pub use error::{Result, ScanError};
pub use scan::{generate_peptides, Candidate, Constraints, PeptideGenerator, SearchStats};
