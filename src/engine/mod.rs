// ==========================================
// 工单拣货清单系统 - 引擎层
// ==========================================
// 职责: 替代规则解析、批次池、库存分配
// 红线: 引擎不读写文件，单线程同步执行
// ==========================================

pub mod allocation;
pub mod lot_pool;
pub mod override_resolver;
pub mod substitute_index;

// 重导出核心引擎
pub use allocation::{
    AllocationEngine, AllocationRun, AllocationStats, SiteRouting, DEFAULT_ALTERNATE_SITE_ID,
    DEFAULT_SECONDARY_SITE_ID,
};
pub use lot_pool::{LotKey, LotPool};
pub use override_resolver::OverrideResolver;
pub use substitute_index::SubstituteIndex;
