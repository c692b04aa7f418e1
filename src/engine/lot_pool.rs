// ==========================================
// 工单拣货清单系统 - 库存批次池
// ==========================================
// 索引: (站点, 物料) → 批次序列
// 排序: 效期升序 (FEFO)，无效期排最后，同效期保持导入顺序
// 红线: 批次剩余量只减不增，不低于 0
// ==========================================

use crate::domain::InventoryLot;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// 批次池键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LotKey {
    pub site_id: i32,
    pub item_id: i64,
}

impl LotKey {
    pub fn new(site_id: i32, item_id: i64) -> Self {
        Self { site_id, item_id }
    }
}

// ==========================================
// LotPool - 可变批次池
// ==========================================
#[derive(Debug, Default)]
pub struct LotPool {
    lots: HashMap<LotKey, Vec<InventoryLot>>,
}

impl LotPool {
    /// 由库存表构建批次池
    #[instrument(skip(lots), fields(lot_count = lots.len()))]
    pub fn build(lots: Vec<InventoryLot>) -> Self {
        let mut grouped: HashMap<LotKey, Vec<InventoryLot>> = HashMap::new();
        for lot in lots {
            grouped
                .entry(LotKey::new(lot.site_id, lot.item_id))
                .or_default()
                .push(lot);
        }

        // sort_by_key 为稳定排序，同效期保持导入顺序
        for sequence in grouped.values_mut() {
            sequence.sort_by_key(|lot| (lot.expiration_date.is_none(), lot.expiration_date));
        }

        debug!(keys = grouped.len(), "批次池构建完成");
        Self { lots: grouped }
    }

    /// 查询 (站点, 物料) 的批次序列；不存在时返回空切片
    pub fn lots_for(&self, site_id: i32, item_id: i64) -> &[InventoryLot] {
        self.lots
            .get(&LotKey::new(site_id, item_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 从指定位置的批次扣减数量
    ///
    /// # 返回
    /// 实际扣减量（超出剩余量的部分被截断，键或位置不存在时为 0）
    pub fn consume(&mut self, key: LotKey, position: usize, qty: Decimal) -> Decimal {
        let Some(lot) = self
            .lots
            .get_mut(&key)
            .and_then(|sequence| sequence.get_mut(position))
        else {
            return Decimal::ZERO;
        };

        let taken = qty.max(Decimal::ZERO).min(lot.remaining_qty);
        lot.remaining_qty -= taken;
        taken
    }

    /// 移除该键下已耗尽的批次，其余批次保持相对顺序
    pub fn compact(&mut self, key: LotKey) {
        if let Some(sequence) = self.lots.get_mut(&key) {
            sequence.retain(|lot| !lot.is_exhausted());
            if sequence.is_empty() {
                self.lots.remove(&key);
            }
        }
    }

    /// (站点, 物料) 剩余总量
    pub fn total_remaining(&self, site_id: i32, item_id: i64) -> Decimal {
        self.lots_for(site_id, item_id)
            .iter()
            .map(|lot| lot.remaining_qty)
            .sum()
    }

    /// 键数量
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// 剩余可用批次（按键排序，键内保持池顺序），用于剩余库存报告
    pub fn remaining_lots(&self) -> Vec<&InventoryLot> {
        let mut keys: Vec<&LotKey> = self.lots.keys().collect();
        keys.sort();
        keys.into_iter()
            .flat_map(|key| self.lots[key].iter())
            .filter(|lot| !lot.is_exhausted())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn lot(lot_id: &str, site_id: i32, item_id: i64, qty: i64, exp: Option<(i32, u32, u32)>) -> InventoryLot {
        InventoryLot {
            lot_id: lot_id.to_string(),
            skid_id: format!("SK-{}", lot_id),
            loc_id: "A-01".to_string(),
            site_id,
            item_id,
            remaining_qty: Decimal::from(qty),
            expiration_date: exp.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            description: None,
            stock_uom: Some("EA".to_string()),
            location_category: Some("W1".to_string()),
            row_number: 0,
        }
    }

    #[test]
    fn test_build_orders_by_expiration_then_load_order() {
        let pool = LotPool::build(vec![
            lot("L1", 1, 100, 5, None),
            lot("L2", 1, 100, 5, Some((2025, 6, 1))),
            lot("L3", 1, 100, 5, Some((2025, 1, 1))),
            lot("L4", 1, 100, 5, Some((2025, 6, 1))),
        ]);

        let ids: Vec<&str> = pool.lots_for(1, 100).iter().map(|l| l.lot_id.as_str()).collect();
        assert_eq!(ids, vec!["L3", "L2", "L4", "L1"]);
    }

    #[test]
    fn test_lots_for_missing_key_is_empty() {
        let pool = LotPool::build(vec![lot("L1", 1, 100, 5, None)]);
        assert!(pool.lots_for(2, 100).is_empty());
        assert!(pool.lots_for(1, 999).is_empty());
        assert_eq!(pool.total_remaining(2, 100), Decimal::ZERO);
    }

    #[test]
    fn test_consume_clamps_to_remaining() {
        let mut pool = LotPool::build(vec![lot("L1", 1, 100, 5, None)]);
        let key = LotKey::new(1, 100);

        assert_eq!(pool.consume(key, 0, Decimal::from(3)), Decimal::from(3));
        assert_eq!(pool.consume(key, 0, Decimal::from(10)), Decimal::from(2));
        assert_eq!(pool.lots_for(1, 100)[0].remaining_qty, Decimal::ZERO);
        assert_eq!(pool.consume(key, 5, Decimal::ONE), Decimal::ZERO);
    }

    #[test]
    fn test_compact_drops_exhausted_and_keeps_order() {
        let mut pool = LotPool::build(vec![
            lot("L1", 1, 100, 5, Some((2025, 1, 1))),
            lot("L2", 1, 100, 5, Some((2025, 2, 1))),
            lot("L3", 1, 100, 5, Some((2025, 3, 1))),
        ]);
        let key = LotKey::new(1, 100);

        pool.consume(key, 1, Decimal::from(5));
        pool.compact(key);

        let ids: Vec<&str> = pool.lots_for(1, 100).iter().map(|l| l.lot_id.as_str()).collect();
        assert_eq!(ids, vec!["L1", "L3"]);
        assert_eq!(pool.total_remaining(1, 100), Decimal::from(10));
    }

    #[test]
    fn test_compact_removes_empty_key() {
        let mut pool = LotPool::build(vec![lot("L1", 1, 100, 5, None)]);
        let key = LotKey::new(1, 100);
        pool.consume(key, 0, Decimal::from(5));
        pool.compact(key);
        assert!(pool.is_empty());
        assert!(pool.remaining_lots().is_empty());
    }

    #[test]
    fn test_total_remaining_non_increasing() {
        let mut pool = LotPool::build(vec![lot("L1", 1, 100, 7, None), lot("L2", 1, 100, 4, None)]);
        let key = LotKey::new(1, 100);
        let mut previous = pool.total_remaining(1, 100);
        for qty in [2, 3, 9, 1] {
            pool.consume(key, 0, Decimal::from(qty));
            pool.consume(key, 1, Decimal::from(qty));
            let current = pool.total_remaining(1, 100);
            assert!(current <= previous);
            previous = current;
        }
    }
}
