// ==========================================
// 工单拣货清单系统 - 物料替代规则
// ==========================================
// 计划员维护的 BOM 替换清单（项目 / 批次 / 工单三个层级）
// ==========================================

use crate::domain::types::SwapLevel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    pub level: SwapLevel, // Swap Level

    // 各层级的范围键，仅与 level 对应的键参与匹配
    pub project_number: Option<String>, // Project Number
    pub work_order_id: Option<String>,  // Work Order ID
    pub batch_number: Option<String>,   // Production Batch Number

    pub original_item_id: i64,   // Original KBI Item Number
    pub substitute_item_id: i64, // Substitute KBI Item Number

    pub row_number: usize,
}

impl OverrideRule {
    /// 本规则层级对应的范围键
    pub fn scope_key(&self) -> Option<&str> {
        match self.level {
            SwapLevel::Project => self.project_number.as_deref(),
            SwapLevel::Batch => self.batch_number.as_deref(),
            SwapLevel::WorkOrder => self.work_order_id.as_deref(),
        }
    }

    /// 规则范围是否命中需求行
    pub fn matches_scope(
        &self,
        work_order_id: &str,
        project_number: Option<&str>,
        batch_number: Option<&str>,
    ) -> bool {
        let Some(key) = self.scope_key() else {
            return false;
        };
        match self.level {
            SwapLevel::Project => project_number == Some(key),
            SwapLevel::Batch => batch_number == Some(key),
            SwapLevel::WorkOrder => work_order_id == key,
        }
    }
}
