// ==========================================
// 工单拣货清单系统 - 需求行领域模型
// ==========================================
// 一行 = 一个工单的一个组件需求
// 生命周期: 导入时创建，分配过程中只追加（替代行），不修改
// ==========================================

use crate::domain::types::OriginFlag;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// DemandLine - 工单组件需求行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandLine {
    // ===== 标识 =====
    pub work_order_id: String, // 工单号 (WORKORDER_ID)
    pub seq_num: u32,          // 工单内序号 (SEQ_NUM)

    // ===== 范围键 =====
    pub project_number: Option<String>, // 项目号 (PROJECT_NUMBER)
    pub batch_number: Option<String>,   // 生产批号 (PROD_BATCH_NUM)
    pub site_id: i32,                   // 需求站点 (SITE_ID)

    // ===== 需求 =====
    pub item_id: i64,                    // 组件物料号 (COMP_ITEMID)
    pub qty: Decimal,                    // 需求数量 (QTY)
    pub sched_datetime: NaiveDateTime,   // 计划时间 (SCHED_DATETIME)

    // ===== 替代 =====
    pub origin: OriginFlag,          // 来源标记 (ORIG_CODE)
    pub orig_seq_num: Option<u32>,   // 替代料关联序号 (ORIG_SEQ_NUM，缺省用 SEQ_NUM)

    // ===== 透传字段 =====
    pub custom_data: Option<String>, // CUSTOM_DATA1

    // ===== 元信息 =====
    pub row_number: usize, // 源文件行号
}

impl DemandLine {
    pub fn is_substitute(&self) -> bool {
        self.origin == OriginFlag::Substitute
    }

    /// 合成替代行：复制全部字段，替换物料号并标记为替代行
    pub fn to_substitute(&self, substitute_item_id: i64) -> DemandLine {
        DemandLine {
            item_id: substitute_item_id,
            origin: OriginFlag::Substitute,
            ..self.clone()
        }
    }
}
