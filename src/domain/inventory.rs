// ==========================================
// 工单拣货清单系统 - 库存批次领域模型
// ==========================================
// 红线: remaining_qty >= 0，只减不增
// ==========================================

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// InventoryLot - 库存批次
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLot {
    // ===== 标识 =====
    pub lot_id: String,  // LOTID
    pub skid_id: String, // SKIDID (托盘/容器)
    pub loc_id: String,  // LOC_ID (库位)

    // ===== 归属 =====
    pub site_id: i32, // SITE_ID
    pub item_id: i64, // ITEM_ID

    // ===== 数量与效期 =====
    pub remaining_qty: Decimal,             // QTYTOTAL (分配中递减)
    pub expiration_date: Option<NaiveDate>, // EXPDATE

    // ===== 描述 =====
    pub description: Option<String>,       // ITEMDESC
    pub stock_uom: Option<String>,         // STOCK_UOM
    pub location_category: Option<String>, // CUSTOM_DATA1

    // ===== 元信息 =====
    pub row_number: usize,
}

impl InventoryLot {
    pub fn is_exhausted(&self) -> bool {
        self.remaining_qty <= Decimal::ZERO
    }
}
