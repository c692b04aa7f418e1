// ==========================================
// 工单拣货清单系统 - 分配结果领域模型
// ==========================================
// AllocationRecord: 拣货清单输出行（只追加，不修改）
// Shortfall: 未满足需求汇总（缺料清单）
// ==========================================

use crate::domain::types::AllocationStatus;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// AllocationRecord - 拣货清单行
// ==========================================
// 序列化列名与既有 Pick List 表头保持一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    // ===== 需求引用 =====
    #[serde(rename = "Project ID")]
    pub project_number: Option<String>,
    #[serde(rename = "Production Batch Number")]
    pub batch_number: Option<String>,
    #[serde(rename = "Custom Data")]
    pub custom_data: Option<String>,
    #[serde(rename = "WORKORDER_ID")]
    pub work_order_id: String,
    #[serde(rename = "SEQ_NUM")]
    pub seq_num: u32,
    #[serde(rename = "ITEM_ID")]
    pub item_id: i64, // 替代后的有效物料号

    // ===== 数量 =====
    #[serde(rename = "TOTAL_QTY_TO_PICK")]
    pub total_qty_to_pick: Decimal,
    #[serde(rename = "LOT_QTY_TO_PICK")]
    pub lot_qty_to_pick: Decimal,

    // ===== 批次引用 =====
    #[serde(rename = "SKIDID")]
    pub skid_id: String,
    #[serde(rename = "LOTID")]
    pub lot_id: String,
    #[serde(rename = "LOC_ID")]
    pub loc_id: String,
    #[serde(rename = "Expiration Date")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(rename = "Item Description")]
    pub item_description: Option<String>,
    #[serde(rename = "Stock UoM")]
    pub stock_uom: Option<String>,

    // ===== 站点 =====
    #[serde(rename = "SOURCE_SITE_ID")]
    pub source_site_id: i32,
    #[serde(rename = "TARGET_SITE_ID")]
    pub target_site_id: i32,

    #[serde(rename = "SCHED_DATETIME")]
    pub sched_datetime: NaiveDateTime,

    // ===== 累计状态（记录生成时刻冻结）=====
    #[serde(rename = "UNFULFILLED_QTY")]
    pub unfulfilled_qty: Decimal,
    #[serde(rename = "ALLOCATION_STATUS")]
    pub allocation_status: AllocationStatus,
}

// ==========================================
// Shortfall - 缺料记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortfall {
    #[serde(rename = "WORKORDER_ID")]
    pub work_order_id: String,
    #[serde(rename = "SEQ_NUM")]
    pub seq_num: u32,
    #[serde(rename = "REQUESTED_ITEM_ID")]
    pub requested_item_id: i64,
    #[serde(rename = "ITEM_ID")]
    pub item_id: i64,
    #[serde(rename = "SITE_ID")]
    pub site_id: i32,
    #[serde(rename = "TOTAL_QTY_TO_PICK")]
    pub requested_qty: Decimal,
    #[serde(rename = "ALLOCATED_QTY")]
    pub allocated_qty: Decimal,
    #[serde(rename = "UNFULFILLED_QTY")]
    pub unfulfilled_qty: Decimal,
    #[serde(rename = "ALLOCATION_STATUS")]
    pub allocation_status: AllocationStatus,
    // 已追加的替代行物料号（无兄弟行时为空）
    #[serde(rename = "SUBSTITUTE_ITEM_ID")]
    pub substitute_item_id: Option<i64>,
}
