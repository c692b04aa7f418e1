// ==========================================
// 工单拣货清单系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 表结构错误 =====
    #[error("{table} 缺少必需列: {columns:?}")]
    MissingColumns { table: String, columns: Vec<String> },

    // ===== 行级映射错误（该行被丢弃）=====
    #[error("必填字段为空 (行 {row}, 字段 {field})")]
    RequiredFieldMissing { row: usize, field: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("日期格式错误 (行 {row}, 字段 {field}): {value}")]
    DateFormatError {
        row: usize,
        field: String,
        value: String,
    },

    #[error("数值范围错误 (行 {row}, 字段 {field}): {value}")]
    ValueRangeError {
        row: usize,
        field: String,
        value: String,
    },

    #[error("替代层级无效 (行 {row}): {value}（仅支持 Project / Batch / Work Order）")]
    InvalidSwapLevel { row: usize, value: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 行级错误只丢弃该行，其余错误中断整个导入
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            ImportError::RequiredFieldMissing { .. }
                | ImportError::TypeConversionError { .. }
                | ImportError::DateFormatError { .. }
                | ImportError::ValueRangeError { .. }
                | ImportError::InvalidSwapLevel { .. }
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
