// ==========================================
// 工单拣货清单系统 - 配置层
// ==========================================
// 职责: 运行配置定义、加载与校验
// 存储: JSON 文件
// ==========================================

pub mod allocation_config;
pub mod config_manager;
pub mod error;

// 重导出核心配置
pub use allocation_config::{AllocationConfig, DEFAULT_LOCATION_CATEGORIES};
pub use config_manager::{ConfigManager, CONFIG_PATH_ENV};
pub use error::{ConfigError, ConfigResult};
