// ==========================================
// 工单拣货清单系统 - 应用层
// ==========================================
// 职责: 串联 导入 → 分配 → 输出；工单查询
// ==========================================

pub mod error;
pub mod pipeline;
pub mod work_order_lookup;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::{PickListPipeline, RunReport};
pub use work_order_lookup::{WorkOrderLookup, WorkOrderNavigator};
