// ==========================================
// 工单拣货清单系统 - 替代料兄弟行索引
// ==========================================
// 序号 → 该序号第一条需求行（计划时间顺序）的组件物料号
// 只由初始需求集构建一次，追加的替代行不入索引
// ==========================================

use crate::domain::DemandLine;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct SubstituteIndex {
    items: HashMap<u32, i64>,
}

impl SubstituteIndex {
    /// 构建索引；调用方传入已按计划时间排序的需求行，同一序号保留第一条
    pub fn build(lines: &[DemandLine]) -> Self {
        let mut items = HashMap::with_capacity(lines.len());
        for line in lines {
            items.entry(line.seq_num).or_insert(line.item_id);
        }
        Self { items }
    }

    pub fn item_at(&self, seq_num: u32) -> Option<i64> {
        self.items.get(&seq_num).copied()
    }

    /// 替代料关联序号：ORIG_SEQ_NUM 优先，缺省时用本行序号
    pub fn link_of(line: &DemandLine) -> u32 {
        line.orig_seq_num.unwrap_or(line.seq_num)
    }

    /// 需求行的替代料
    pub fn substitute_for(&self, line: &DemandLine) -> Option<i64> {
        self.item_at(Self::link_of(line))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
