// ==========================================
// AllocationEngine 集成测试
// ==========================================
// 测试目标: 验证 FEFO 分配、站点路由、替代规则与替代行追加
// 覆盖范围: 典型场景 + 数量守恒性质
// ==========================================

mod helpers;

use helpers::test_data_builder::{
    date, project_rule, work_order_rule, DemandLineBuilder, LotBuilder,
};
use pick_list::domain::{AllocationStatus, InventoryLot, OriginFlag};
use pick_list::engine::{AllocationEngine, LotPool, OverrideResolver, SiteRouting};
use pick_list::SubstitutePolicy;
use rust_decimal::Decimal;
use std::collections::HashMap;

// ==========================================
// 测试辅助函数
// ==========================================

fn default_engine() -> AllocationEngine {
    AllocationEngine::new(SiteRouting::default(), SubstitutePolicy::SkipSubstitutes)
}

fn no_overrides() -> OverrideResolver {
    OverrideResolver::new(vec![])
}

fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

// ==========================================
// 场景测试
// ==========================================

#[test]
fn test_secondary_site_draws_from_alternate_site_first() {
    // 次站点(2)需求，备选站点(5)有更早到期的批次
    let lines = vec![DemandLineBuilder::new("WO-A", 10).site(2).qty(100).build()];
    let mut pool = LotPool::build(vec![
        LotBuilder::new("L-HOME").site(2).qty(500).expires(date(2025, 4, 1)).build(),
        LotBuilder::new("L-ALT").site(5).qty(150).expires(date(2025, 3, 15)).build(),
    ]);

    let run = default_engine().run(lines, &mut pool, &no_overrides());

    assert_eq!(run.records.len(), 1);
    let record = &run.records[0];
    assert_eq!(record.lot_id, "L-ALT");
    assert_eq!(record.source_site_id, 5);
    assert_eq!(record.target_site_id, 2);
    assert_eq!(record.lot_qty_to_pick, dec(100));
    assert_eq!(record.allocation_status, AllocationStatus::FullyAllocated);

    assert_eq!(pool.total_remaining(5, 100), dec(50));
    assert_eq!(pool.total_remaining(2, 100), dec(500));
    assert!(run.shortfalls.is_empty());
}

#[test]
fn test_fefo_spans_lots_with_cumulative_status() {
    let lines = vec![DemandLineBuilder::new("WO-B", 10).site(1).qty(50).build()];
    let mut pool = LotPool::build(vec![
        LotBuilder::new("L-LATE").qty(40).expires(date(2025, 8, 1)).build(),
        LotBuilder::new("L-EARLY").qty(20).expires(date(2025, 5, 1)).build(),
    ]);

    let run = default_engine().run(lines, &mut pool, &no_overrides());

    assert_eq!(run.records.len(), 2);

    assert_eq!(run.records[0].lot_id, "L-EARLY");
    assert_eq!(run.records[0].lot_qty_to_pick, dec(20));
    assert_eq!(run.records[0].unfulfilled_qty, dec(30));
    assert_eq!(run.records[0].allocation_status, AllocationStatus::PartiallyAllocated);

    assert_eq!(run.records[1].lot_id, "L-LATE");
    assert_eq!(run.records[1].lot_qty_to_pick, dec(30));
    assert_eq!(run.records[1].unfulfilled_qty, dec(0));
    assert_eq!(run.records[1].allocation_status, AllocationStatus::FullyAllocated);

    // 耗尽的批次已移出，剩余批次余量 10
    let remaining = pool.lots_for(1, 100);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].lot_id, "L-LATE");
    assert_eq!(remaining[0].remaining_qty, dec(10));
}

#[test]
fn test_shortfall_appends_substitute_line_from_sibling() {
    let lines = vec![
        DemandLineBuilder::new("WO-C", 10).item(100).qty(10).linked_to(20).build(),
        DemandLineBuilder::new("WO-C", 20).item(200).qty(10).substitute().build(),
    ];
    let mut pool = LotPool::build(vec![]);

    let run = default_engine().run(lines, &mut pool, &no_overrides());

    assert!(run.records.is_empty());
    assert_eq!(run.lines.len(), 3);

    let appended = run.lines.last().unwrap();
    assert_eq!(appended.work_order_id, "WO-C");
    assert_eq!(appended.seq_num, 10);
    assert_eq!(appended.item_id, 200);
    assert_eq!(appended.qty, dec(10));
    assert_eq!(appended.origin, OriginFlag::Substitute);

    assert_eq!(run.stats.substitutes_appended, 1);
    // 原有替代行 + 追加的替代行都按默认策略跳过
    assert_eq!(run.stats.lines_skipped, 2);

    assert_eq!(run.shortfalls.len(), 1);
    let shortfall = &run.shortfalls[0];
    assert_eq!(shortfall.seq_num, 10);
    assert_eq!(shortfall.unfulfilled_qty, dec(10));
    assert_eq!(shortfall.allocation_status, AllocationStatus::NotAllocated);
    assert_eq!(shortfall.substitute_item_id, Some(200));
}

#[test]
fn test_missing_sibling_leaves_shortfall_unresolved() {
    let lines = vec![DemandLineBuilder::new("WO-C", 10).qty(10).linked_to(99).build()];
    let mut pool = LotPool::build(vec![]);

    let run = default_engine().run(lines, &mut pool, &no_overrides());

    assert_eq!(run.lines.len(), 1);
    assert_eq!(run.stats.substitutes_appended, 0);
    assert_eq!(run.shortfalls[0].substitute_item_id, None);
}

#[test]
fn test_work_order_override_resolves_before_lookup() {
    let lines = vec![
        DemandLineBuilder::new("WO-D", 10).item(100).qty(10).build(),
        DemandLineBuilder::new("WO-OTHER", 10).item(100).qty(10).build(),
    ];
    let resolver = OverrideResolver::new(vec![work_order_rule("WO-D", 100, 300)]);
    let mut pool = LotPool::build(vec![LotBuilder::new("L-Z").item(300).qty(50).build()]);

    let run = default_engine().run(lines, &mut pool, &resolver);

    assert_eq!(run.records.len(), 1);
    assert_eq!(run.records[0].work_order_id, "WO-D");
    assert_eq!(run.records[0].item_id, 300);
    assert_eq!(pool.total_remaining(1, 300), dec(40));

    // 未命中规则的工单仍按原物料查找
    assert_eq!(run.shortfalls.len(), 1);
    assert_eq!(run.shortfalls[0].work_order_id, "WO-OTHER");
    assert_eq!(run.shortfalls[0].item_id, 100);
}

#[test]
fn test_project_override_applies_to_matching_project_only() {
    let lines = vec![
        DemandLineBuilder::new("WO-1", 10).project("P-1").item(100).qty(5).build(),
        DemandLineBuilder::new("WO-2", 10).project("P-2").item(100).qty(5).build(),
    ];
    let resolver = OverrideResolver::new(vec![project_rule("P-1", 100, 400)]);
    let mut pool = LotPool::build(vec![
        LotBuilder::new("L-400").item(400).qty(5).build(),
        LotBuilder::new("L-100").item(100).qty(5).build(),
    ]);

    let run = default_engine().run(lines, &mut pool, &resolver);

    assert_eq!(run.records.len(), 2);
    assert_eq!(run.records[0].lot_id, "L-400");
    assert_eq!(run.records[1].lot_id, "L-100");
}

#[test]
fn test_substitute_flagged_line_is_not_allocated() {
    let lines = vec![DemandLineBuilder::new("WO-E", 20).qty(10).substitute().build()];
    let mut pool = LotPool::build(vec![LotBuilder::new("L-1").qty(50).build()]);

    let run = default_engine().run(lines, &mut pool, &no_overrides());

    assert!(run.records.is_empty());
    assert!(run.shortfalls.is_empty());
    assert_eq!(pool.total_remaining(1, 100), dec(50));
}

#[test]
fn test_allocate_substitutes_policy_fills_from_substitute_item() {
    let lines = vec![
        DemandLineBuilder::new("WO-F", 10).item(100).qty(10).linked_to(20).build(),
        // 兄弟行放在无库存站点
        DemandLineBuilder::new("WO-F", 20).item(200).site(3).qty(4).substitute().build(),
    ];
    let mut pool = LotPool::build(vec![
        LotBuilder::new("L-100").item(100).qty(6).build(),
        LotBuilder::new("L-200").item(200).qty(20).build(),
    ]);
    let engine = AllocationEngine::new(SiteRouting::default(), SubstitutePolicy::AllocateSubstitutes);

    let run = engine.run(lines, &mut pool, &no_overrides());

    // 原行 6 + 追加替代行按原需求量 10 从 200 分配
    let appended: Vec<_> = run
        .records
        .iter()
        .filter(|record| record.item_id == 200 && record.seq_num == 10)
        .collect();
    assert_eq!(run.records[0].lot_id, "L-100");
    assert_eq!(appended.len(), 1);
    assert_eq!(appended[0].lot_qty_to_pick, dec(10));
    assert_eq!(run.stats.substitutes_appended, 1);
    assert_eq!(run.lines.len(), 3);
}

#[test]
fn test_lots_without_expiration_are_drawn_last() {
    let lines = vec![DemandLineBuilder::new("WO-G", 10).qty(15).build()];
    let mut pool = LotPool::build(vec![
        LotBuilder::new("L-NOEXP").qty(10).build(),
        LotBuilder::new("L-EXP").qty(10).expires(date(2026, 1, 1)).build(),
    ]);

    let run = default_engine().run(lines, &mut pool, &no_overrides());

    let lot_ids: Vec<_> = run.records.iter().map(|r| r.lot_id.as_str()).collect();
    assert_eq!(lot_ids, vec!["L-EXP", "L-NOEXP"]);
}

#[test]
fn test_earlier_schedule_wins_contended_lot() {
    let lines = vec![
        DemandLineBuilder::new("WO-LATE", 10).qty(10).sched_day(5).build(),
        DemandLineBuilder::new("WO-EARLY", 10).qty(10).sched_day(2).build(),
    ];
    let mut pool = LotPool::build(vec![LotBuilder::new("L-1").qty(10).build()]);

    let run = default_engine().run(lines, &mut pool, &no_overrides());

    assert_eq!(run.records.len(), 1);
    assert_eq!(run.records[0].work_order_id, "WO-EARLY");
    assert_eq!(run.shortfalls[0].work_order_id, "WO-LATE");
    assert_eq!(run.records_for_work_order("WO-LATE").count(), 0);
}

// ==========================================
// 数量守恒性质
// ==========================================

fn mixed_lots() -> Vec<InventoryLot> {
    vec![
        LotBuilder::new("L-1").site(1).item(100).qty(30).expires(date(2025, 5, 1)).build(),
        LotBuilder::new("L-2").site(1).item(100).qty(25).expires(date(2025, 6, 1)).build(),
        LotBuilder::new("L-3").site(5).item(100).qty(12).expires(date(2025, 4, 1)).build(),
        LotBuilder::new("L-4").site(2).item(100).qty(40).build(),
        LotBuilder::new("L-5").site(1).item(300).qty(18).expires(date(2025, 7, 1)).build(),
        LotBuilder::new("L-6").site(2).item(200).qty(7).build(),
    ]
}

fn mixed_lines() -> Vec<pick_list::DemandLine> {
    vec![
        DemandLineBuilder::new("WO-1", 10).site(1).item(100).qty(45).linked_to(20).sched_day(3).build(),
        DemandLineBuilder::new("WO-1", 20).site(1).item(300).qty(45).substitute().sched_day(3).build(),
        DemandLineBuilder::new("WO-2", 10).site(2).item(100).qty(35).sched_day(1).build(),
        DemandLineBuilder::new("WO-3", 10).site(2).item(200).qty(20).project("P-9").sched_day(2).build(),
        DemandLineBuilder::new("WO-4", 10).site(1).item(100).qty(60).sched_day(4).build(),
    ]
}

#[test]
fn test_quantities_are_conserved() {
    let lots = mixed_lots();
    let starting: HashMap<String, Decimal> = lots
        .iter()
        .map(|lot| (lot.lot_id.clone(), lot.remaining_qty))
        .collect();

    let resolver = OverrideResolver::new(vec![project_rule("P-9", 200, 100)]);
    let mut pool = LotPool::build(lots);
    let engine = AllocationEngine::new(SiteRouting::default(), SubstitutePolicy::AllocateSubstitutes);

    let run = engine.run(mixed_lines(), &mut pool, &resolver);
    assert!(!run.records.is_empty());

    // 每个需求行的分配量不超过需求量
    let mut per_line: HashMap<(String, u32, i64), Decimal> = HashMap::new();
    for record in &run.records {
        *per_line
            .entry((record.work_order_id.clone(), record.seq_num, record.item_id))
            .or_default() += record.lot_qty_to_pick;
        assert!(record.lot_qty_to_pick > Decimal::ZERO);
        assert!(record.lot_qty_to_pick <= record.total_qty_to_pick);
    }
    for (key, allocated) in &per_line {
        let requested = run
            .records
            .iter()
            .find(|r| (r.work_order_id.clone(), r.seq_num, r.item_id) == *key)
            .map(|r| r.total_qty_to_pick)
            .unwrap();
        assert!(*allocated <= requested, "{:?} 超量分配", key);
    }

    // 每个批次的消耗量不超过初始余量
    let mut per_lot: HashMap<String, Decimal> = HashMap::new();
    for record in &run.records {
        *per_lot.entry(record.lot_id.clone()).or_default() += record.lot_qty_to_pick;
    }
    for (lot_id, consumed) in &per_lot {
        assert!(*consumed <= starting[lot_id], "批次 {} 超量消耗", lot_id);
    }

    // 消耗量 + 剩余量 = 初始量
    for lot in pool.remaining_lots() {
        let consumed = per_lot.get(&lot.lot_id).copied().unwrap_or_default();
        assert_eq!(consumed + lot.remaining_qty, starting[&lot.lot_id]);
        assert!(lot.remaining_qty > Decimal::ZERO);
    }
}

#[test]
fn test_pool_remaining_is_non_increasing_across_runs() {
    let mut pool = LotPool::build(mixed_lots());
    let keys = [(1, 100), (2, 100), (5, 100), (1, 300), (2, 200)];
    let before: Vec<Decimal> = keys.iter().map(|(s, i)| pool.total_remaining(*s, *i)).collect();

    let engine = default_engine();
    engine.run(mixed_lines(), &mut pool, &no_overrides());
    let after_first: Vec<Decimal> = keys.iter().map(|(s, i)| pool.total_remaining(*s, *i)).collect();

    engine.run(mixed_lines(), &mut pool, &no_overrides());
    let after_second: Vec<Decimal> = keys.iter().map(|(s, i)| pool.total_remaining(*s, *i)).collect();

    for idx in 0..keys.len() {
        assert!(after_first[idx] <= before[idx]);
        assert!(after_second[idx] <= after_first[idx]);
        assert!(after_second[idx] >= Decimal::ZERO);
    }
}

#[test]
fn test_resolve_is_idempotent() {
    // 300 → 700 与 100 → 300 构成链，重复解析仍只走一步
    let resolver = OverrideResolver::new(vec![
        work_order_rule("WO-1", 100, 300),
        project_rule("P-1", 100, 500),
        work_order_rule("WO-1", 300, 700),
    ]);

    for item_id in [100, 300, 500, 999] {
        let once = resolver.resolve(item_id, "WO-1", Some("P-1"), None);
        let twice = resolver.resolve(item_id, "WO-1", Some("P-1"), None);
        assert_eq!(once, twice, "物料 {} 重复解析结果不一致", item_id);
    }
    assert_eq!(resolver.resolve(100, "WO-1", Some("P-1"), None), 300);
    assert_eq!(resolver.resolve(300, "WO-1", Some("P-1"), None), 700);
}
