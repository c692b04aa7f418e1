// ==========================================
// 工单拣货清单系统 - 核心库
// ==========================================
// 输入: 工单需求表 / 库存批次表 / 计划员 BOM 替换清单
// 输出: 按 FEFO 生成的批次级拣货清单
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分配规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 运行配置
pub mod config;

// 输出层 - 拣货清单读写
pub mod export;

// 应用层 - 流水线
pub mod app;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AllocationStatus, OriginFlag, SubstitutePolicy, SwapLevel};

// 领域实体
pub use domain::{AllocationRecord, DemandLine, InventoryLot, OverrideRule, Shortfall};

// 引擎
pub use engine::{AllocationEngine, AllocationRun, LotPool, OverrideResolver, SiteRouting};

// 配置
pub use config::{AllocationConfig, ConfigManager};

// 应用
pub use app::{PickListPipeline, RunReport};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工单拣货清单系统";
