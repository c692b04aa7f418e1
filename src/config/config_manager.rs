// ==========================================
// 工单拣货清单系统 - 配置管理器
// ==========================================
// 职责: 定位配置文件、加载、校验
// 查找顺序: 显式路径 → 环境变量 PICK_LIST_CONFIG → 用户配置目录
// ==========================================

use crate::config::allocation_config::AllocationConfig;
use crate::config::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "PICK_LIST_CONFIG";

/// 用户配置目录下的子目录名
const CONFIG_DIR_NAME: &str = "pick-list";

/// 配置文件名
const CONFIG_FILE_NAME: &str = "config.json";

pub struct ConfigManager;

impl ConfigManager {
    /// 默认配置文件路径
    ///
    /// 允许通过环境变量显式指定（便于调试/测试/计划任务）
    pub fn default_config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        match dirs::config_dir() {
            Some(dir) => dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
            None => PathBuf::from(CONFIG_FILE_NAME),
        }
    }

    /// 加载配置
    ///
    /// # 参数
    /// - path: 显式指定的配置文件；为 None 时使用默认路径
    ///
    /// # 返回
    /// - 显式路径不存在: Err
    /// - 默认路径不存在: 默认配置
    pub fn load(path: Option<&Path>) -> ConfigResult<AllocationConfig> {
        let config = match path {
            Some(explicit) => Self::load_from_file(explicit)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::load_from_file(&default_path)?
                } else {
                    warn!(path = %default_path.display(), "未找到配置文件，使用默认配置");
                    AllocationConfig::default()
                }
            }
        };

        Self::validate(&config)?;
        Ok(config)
    }

    /// 从 JSON 文件加载；相对路径按配置文件所在目录解析
    pub fn load_from_file(path: &Path) -> ConfigResult<AllocationConfig> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut config: AllocationConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        if let Some(base_dir) = path.parent() {
            Self::resolve_relative_paths(&mut config, base_dir);
        }

        info!(path = %path.display(), "配置加载完成");
        Ok(config)
    }

    fn resolve_relative_paths(config: &mut AllocationConfig, base_dir: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base_dir.join(&*p);
            }
        };
        resolve(&mut config.demand_file);
        resolve(&mut config.inventory_file);
        resolve(&mut config.override_file);
        resolve(&mut config.output_file);
        if let Some(shortage_file) = config.shortage_file.as_mut() {
            resolve(shortage_file);
        }
    }

    /// 校验配置
    pub fn validate(config: &AllocationConfig) -> ConfigResult<()> {
        if config.valid_location_categories.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "valid_location_categories".to_string(),
                message: "库位类别白名单不能为空".to_string(),
            });
        }

        if config.secondary_site_id == config.alternate_site_id {
            return Err(ConfigError::InvalidValue {
                key: "alternate_site_id".to_string(),
                message: format!(
                    "备选站点不能与次站点相同: {}",
                    config.alternate_site_id
                ),
            });
        }

        if config.shortage_file.as_ref() == Some(&config.output_file) {
            return Err(ConfigError::InvalidValue {
                key: "shortage_file".to_string(),
                message: "缺料清单不能与拣货清单使用同一文件".to_string(),
            });
        }

        Ok(())
    }
}
