use thiserror::Error;

/// 扫描过程中所有可能出现的错误（均为结构 / 配置错误，不存在可重试的瞬时错误）
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("unknown residue code '{0}'")]
    UnknownResidue(char),

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("invalid residue catalog: {0}")]
    InvalidCatalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScanError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        ScanError::InvalidParameter { name, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
