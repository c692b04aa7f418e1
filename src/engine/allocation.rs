// ==========================================
// 工单拣货清单系统 - 库存分配引擎
// ==========================================
// 输入: 需求行 + 批次池 + 替代规则解析器
// 输出: 拣货清单行（只追加）+ 缺料汇总 + 追加的替代行
// ==========================================
// 流程（每个需求行）:
// 1) 解析替代规则得到有效物料号
// 2) 确定探测站点（次站点需求先探测备选站点）
// 3) 按 FEFO 逐批次扣减，每批次输出一行
// 4) 仍有缺口时按替代料关联序号查找替代料，追加替代需求行到队尾
// ==========================================

use crate::domain::{AllocationRecord, AllocationStatus, DemandLine, InventoryLot, Shortfall, SubstitutePolicy};
use crate::engine::lot_pool::{LotKey, LotPool};
use crate::engine::override_resolver::OverrideResolver;
use crate::engine::substitute_index::SubstituteIndex;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// 默认次站点（该站点的需求先从备选站点取料）
pub const DEFAULT_SECONDARY_SITE_ID: i32 = 2;

/// 默认备选站点
pub const DEFAULT_ALTERNATE_SITE_ID: i32 = 5;

// ==========================================
// SiteRouting - 站点探测规则
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteRouting {
    pub secondary_site_id: i32,
    pub alternate_site_id: i32,
}

impl Default for SiteRouting {
    fn default() -> Self {
        Self {
            secondary_site_id: DEFAULT_SECONDARY_SITE_ID,
            alternate_site_id: DEFAULT_ALTERNATE_SITE_ID,
        }
    }
}

impl SiteRouting {
    /// 需求站点对应的探测顺序（备选站点优先，不是兜底）
    pub fn candidate_sites(&self, home_site_id: i32) -> Vec<i32> {
        if home_site_id == self.secondary_site_id && self.alternate_site_id != home_site_id {
            vec![self.alternate_site_id, home_site_id]
        } else {
            vec![home_site_id]
        }
    }
}

// ==========================================
// 运行结果
// ==========================================

/// 分配统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllocationStats {
    pub lines_total: usize,         // 队列最终长度（含追加行）
    pub lines_processed: usize,     // 参与分配的行
    pub lines_skipped: usize,       // 按策略跳过的替代行
    pub substitutes_appended: usize,
    pub fully_allocated: usize,
    pub partially_allocated: usize,
    pub not_allocated: usize,
    pub records_emitted: usize,
}

/// 一次分配运行的结果
#[derive(Debug, Clone, Default)]
pub struct AllocationRun {
    /// 拣货清单（按生成顺序）
    pub records: Vec<AllocationRecord>,
    /// 最终需求队列（计划时间排序后的原始行 + 追加的替代行）
    pub lines: Vec<DemandLine>,
    /// 未满足的需求行
    pub shortfalls: Vec<Shortfall>,
    pub stats: AllocationStats,
}

impl AllocationRun {
    /// 指定工单的拣货行
    pub fn records_for_work_order<'a>(
        &'a self,
        work_order_id: &'a str,
    ) -> impl Iterator<Item = &'a AllocationRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.work_order_id == work_order_id)
    }
}

/// 单行分配结果
struct LineOutcome {
    records: Vec<AllocationRecord>,
    effective_item_id: i64,
    allocated: Decimal,
    substitute: Option<DemandLine>,
}

// ==========================================
// AllocationEngine - 分配引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct AllocationEngine {
    routing: SiteRouting,
    substitute_policy: SubstitutePolicy,
}

impl AllocationEngine {
    pub fn new(routing: SiteRouting, substitute_policy: SubstitutePolicy) -> Self {
        Self {
            routing,
            substitute_policy,
        }
    }

    pub fn routing(&self) -> SiteRouting {
        self.routing
    }

    pub fn substitute_policy(&self) -> SubstitutePolicy {
        self.substitute_policy
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 执行分配
    ///
    /// 需求行按计划时间稳定排序后进入工作队列；处理过程中追加的替代行
    /// 排在队尾，队列游标走到末尾时结束。批次池在运行期间被独占修改。
    #[instrument(skip_all, fields(
        demand_count = demand_lines.len(),
        pool_keys = pool.len(),
        override_rules = resolver.len(),
        policy = %self.substitute_policy
    ))]
    pub fn run(
        &self,
        mut demand_lines: Vec<DemandLine>,
        pool: &mut LotPool,
        resolver: &OverrideResolver,
    ) -> AllocationRun {
        demand_lines.sort_by_key(|line| line.sched_datetime);
        let substitute_index = SubstituteIndex::build(&demand_lines);

        let mut queue = demand_lines;
        let mut records = Vec::new();
        let mut shortfalls = Vec::new();
        let mut stats = AllocationStats::default();

        let mut cursor = 0;
        while cursor < queue.len() {
            let line = &queue[cursor];
            cursor += 1;

            if line.is_substitute() && self.substitute_policy == SubstitutePolicy::SkipSubstitutes {
                debug!(
                    work_order_id = %line.work_order_id,
                    seq_num = line.seq_num,
                    item_id = line.item_id,
                    "跳过替代行"
                );
                stats.lines_skipped += 1;
                continue;
            }

            let outcome = self.allocate_line(line, pool, resolver, &substitute_index);
            stats.lines_processed += 1;

            let unfulfilled = line.qty - outcome.allocated;
            match AllocationStatus::from_totals(outcome.allocated, line.qty) {
                AllocationStatus::FullyAllocated => stats.fully_allocated += 1,
                AllocationStatus::PartiallyAllocated => stats.partially_allocated += 1,
                AllocationStatus::NotAllocated => stats.not_allocated += 1,
            }

            if unfulfilled > Decimal::ZERO {
                shortfalls.push(Shortfall {
                    work_order_id: line.work_order_id.clone(),
                    seq_num: line.seq_num,
                    requested_item_id: line.item_id,
                    item_id: outcome.effective_item_id,
                    site_id: line.site_id,
                    requested_qty: line.qty,
                    allocated_qty: outcome.allocated,
                    unfulfilled_qty: unfulfilled,
                    allocation_status: AllocationStatus::from_totals(outcome.allocated, line.qty),
                    substitute_item_id: outcome.substitute.as_ref().map(|sub| sub.item_id),
                });
            }

            stats.records_emitted += outcome.records.len();
            records.extend(outcome.records);

            if let Some(substitute) = outcome.substitute {
                debug!(
                    work_order_id = %substitute.work_order_id,
                    seq_num = substitute.seq_num,
                    substitute_item_id = substitute.item_id,
                    "追加替代需求行"
                );
                stats.substitutes_appended += 1;
                queue.push(substitute);
            }
        }

        stats.lines_total = queue.len();
        info!(
            lines = stats.lines_total,
            processed = stats.lines_processed,
            skipped = stats.lines_skipped,
            substitutes = stats.substitutes_appended,
            records = stats.records_emitted,
            shortfalls = shortfalls.len(),
            "库存分配完成"
        );

        AllocationRun {
            records,
            lines: queue,
            shortfalls,
            stats,
        }
    }

    /// 单个需求行的分配
    fn allocate_line(
        &self,
        line: &DemandLine,
        pool: &mut LotPool,
        resolver: &OverrideResolver,
        substitute_index: &SubstituteIndex,
    ) -> LineOutcome {
        // 替代行本身是替代结果，不再走替代规则
        let effective_item_id = if line.is_substitute() {
            line.item_id
        } else {
            resolver.resolve(
                line.item_id,
                &line.work_order_id,
                line.project_number.as_deref(),
                line.batch_number.as_deref(),
            )
        };

        let mut records = Vec::new();
        let mut allocated = Decimal::ZERO;
        let mut remaining = line.qty;

        for site_id in self.routing.candidate_sites(line.site_id) {
            if remaining <= Decimal::ZERO {
                break;
            }

            let key = LotKey::new(site_id, effective_item_id);
            let mut position = 0;
            while remaining > Decimal::ZERO {
                let Some(lot) = pool.lots_for(site_id, effective_item_id).get(position).cloned() else {
                    break;
                };
                position += 1;

                if lot.is_exhausted() {
                    continue;
                }

                let taken = pool.consume(key, position - 1, remaining.min(lot.remaining_qty));
                allocated += taken;
                remaining -= taken;

                records.push(build_record(line, effective_item_id, site_id, &lot, taken, allocated));
            }
            pool.compact(key);
        }

        let substitute = if remaining > Decimal::ZERO && !line.is_substitute() {
            substitute_index
                .substitute_for(line)
                .map(|item_id| line.to_substitute(item_id))
        } else {
            None
        };

        debug!(
            work_order_id = %line.work_order_id,
            seq_num = line.seq_num,
            item_id = effective_item_id,
            requested = %line.qty,
            allocated = %allocated,
            lots = records.len(),
            "需求行分配"
        );

        LineOutcome {
            records,
            effective_item_id,
            allocated,
            substitute,
        }
    }
}

/// 生成拣货清单行（状态按本行累计分配量冻结）
fn build_record(
    line: &DemandLine,
    item_id: i64,
    source_site_id: i32,
    lot: &InventoryLot,
    lot_qty: Decimal,
    allocated_so_far: Decimal,
) -> AllocationRecord {
    AllocationRecord {
        project_number: line.project_number.clone(),
        batch_number: line.batch_number.clone(),
        custom_data: line.custom_data.clone(),
        work_order_id: line.work_order_id.clone(),
        seq_num: line.seq_num,
        item_id,
        total_qty_to_pick: line.qty,
        lot_qty_to_pick: lot_qty,
        skid_id: lot.skid_id.clone(),
        lot_id: lot.lot_id.clone(),
        loc_id: lot.loc_id.clone(),
        expiration_date: lot.expiration_date,
        item_description: lot.description.clone(),
        stock_uom: lot.stock_uom.clone(),
        source_site_id,
        target_site_id: line.site_id,
        sched_datetime: line.sched_datetime,
        unfulfilled_qty: line.qty - allocated_so_far,
        allocation_status: AllocationStatus::from_totals(allocated_so_far, line.qty),
    }
}
