// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use pick_list::domain::{DemandLine, InventoryLot, OriginFlag, OverrideRule, SwapLevel};
use rust_decimal::Decimal;

/// 2025-03-01 起第 day 天 08:00
pub fn sched(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// DemandLine 构建器
// ==========================================

pub struct DemandLineBuilder {
    line: DemandLine,
}

impl DemandLineBuilder {
    pub fn new(work_order_id: &str, seq_num: u32) -> Self {
        Self {
            line: DemandLine {
                work_order_id: work_order_id.to_string(),
                seq_num,
                project_number: None,
                batch_number: None,
                site_id: 1,
                item_id: 100,
                qty: Decimal::from(10),
                sched_datetime: sched(1),
                origin: OriginFlag::Original,
                orig_seq_num: None,
                custom_data: None,
                row_number: seq_num as usize + 1,
            },
        }
    }

    pub fn item(mut self, item_id: i64) -> Self {
        self.line.item_id = item_id;
        self
    }

    pub fn qty(mut self, qty: i64) -> Self {
        self.line.qty = Decimal::from(qty);
        self
    }

    pub fn site(mut self, site_id: i32) -> Self {
        self.line.site_id = site_id;
        self
    }

    pub fn sched_day(mut self, day: u32) -> Self {
        self.line.sched_datetime = sched(day);
        self
    }

    pub fn project(mut self, project_number: &str) -> Self {
        self.line.project_number = Some(project_number.to_string());
        self
    }

    pub fn batch(mut self, batch_number: &str) -> Self {
        self.line.batch_number = Some(batch_number.to_string());
        self
    }

    pub fn substitute(mut self) -> Self {
        self.line.origin = OriginFlag::Substitute;
        self
    }

    pub fn linked_to(mut self, orig_seq_num: u32) -> Self {
        self.line.orig_seq_num = Some(orig_seq_num);
        self
    }

    pub fn build(self) -> DemandLine {
        self.line
    }
}

// ==========================================
// InventoryLot 构建器
// ==========================================

pub struct LotBuilder {
    lot: InventoryLot,
}

impl LotBuilder {
    pub fn new(lot_id: &str) -> Self {
        Self {
            lot: InventoryLot {
                lot_id: lot_id.to_string(),
                skid_id: format!("SK-{}", lot_id),
                loc_id: "A-01".to_string(),
                site_id: 1,
                item_id: 100,
                remaining_qty: Decimal::from(10),
                expiration_date: None,
                description: Some("Test component".to_string()),
                stock_uom: Some("EA".to_string()),
                location_category: Some("W1".to_string()),
                row_number: 2,
            },
        }
    }

    pub fn site(mut self, site_id: i32) -> Self {
        self.lot.site_id = site_id;
        self
    }

    pub fn item(mut self, item_id: i64) -> Self {
        self.lot.item_id = item_id;
        self
    }

    pub fn qty(mut self, qty: i64) -> Self {
        self.lot.remaining_qty = Decimal::from(qty);
        self
    }

    pub fn expires(mut self, expiration_date: NaiveDate) -> Self {
        self.lot.expiration_date = Some(expiration_date);
        self
    }

    pub fn build(self) -> InventoryLot {
        self.lot
    }
}

// ==========================================
// OverrideRule 构建器
// ==========================================

pub fn work_order_rule(work_order_id: &str, original: i64, substitute: i64) -> OverrideRule {
    OverrideRule {
        level: SwapLevel::WorkOrder,
        project_number: None,
        work_order_id: Some(work_order_id.to_string()),
        batch_number: None,
        original_item_id: original,
        substitute_item_id: substitute,
        row_number: 2,
    }
}

pub fn project_rule(project_number: &str, original: i64, substitute: i64) -> OverrideRule {
    OverrideRule {
        level: SwapLevel::Project,
        project_number: Some(project_number.to_string()),
        work_order_id: None,
        batch_number: None,
        original_item_id: original,
        substitute_item_id: substitute,
        row_number: 2,
    }
}
