// ==========================================
// 工单拣货清单系统 - 领域模型层
// ==========================================
// 职责: 定义需求行、库存批次、替代规则、分配结果
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod allocation;
pub mod demand;
pub mod inventory;
pub mod override_rule;
pub mod types;

// 重导出核心类型
pub use allocation::{AllocationRecord, Shortfall};
pub use demand::DemandLine;
pub use inventory::InventoryLot;
pub use override_rule::OverrideRule;
pub use types::{AllocationStatus, OriginFlag, SubstitutePolicy, SwapLevel};
