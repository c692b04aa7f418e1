// ==========================================
// 工单拣货清单系统 - 输出层
// ==========================================
// 职责: 拣货清单 / 缺料清单写出与回查
// 格式: CSV
// ==========================================

pub mod error;
pub mod pick_list;

pub use error::{ExportError, ExportResult};
pub use pick_list::{PickListReader, PickListWriter, PICK_LIST_HEADERS, SHORTAGE_HEADERS};
