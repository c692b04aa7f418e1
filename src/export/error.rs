// ==========================================
// 工单拣货清单系统 - 输出层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件写入失败: {0}")]
    FileWriteError(String),

    #[error("CSV 读写失败: {0}")]
    CsvError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::FileWriteError(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvError(err.to_string())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
