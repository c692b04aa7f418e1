// ==========================================
// 工单拣货清单系统 - 应用层错误类型
// ==========================================

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("输出失败: {0}")]
    Export(#[from] ExportError),

    #[error("任务执行失败: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
