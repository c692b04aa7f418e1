// ==========================================
// 工单拣货清单系统 - 工单查询
// ==========================================
// 流程:
// 1. 从工单需求表中查找工单（不存在 → 工单未找到）
// 2. 读取已生成的拣货清单，过滤该工单（无行 → 无拣货数据）
// ==========================================

use crate::app::error::PipelineResult;
use crate::config::AllocationConfig;
use crate::domain::{AllocationRecord, DemandLine};
use crate::export::PickListReader;
use crate::importer::field_mapper::normalize_key;
use crate::importer::TableImporter;
use serde::Serialize;
use tracing::{info, instrument, warn};

/// 工单查询结果
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkOrderLookup {
    /// 需求表中没有该工单
    WorkOrderNotFound { work_order_id: String },

    /// 工单存在，但拣货清单中没有对应行
    NoPickListData {
        work_order_id: String,
        demand_lines: Vec<DemandLine>,
    },

    Found {
        work_order_id: String,
        demand_lines: Vec<DemandLine>,
        pick_list: Vec<AllocationRecord>,
    },
}

impl WorkOrderLookup {
    pub fn work_order_id(&self) -> &str {
        match self {
            WorkOrderLookup::WorkOrderNotFound { work_order_id }
            | WorkOrderLookup::NoPickListData { work_order_id, .. }
            | WorkOrderLookup::Found { work_order_id, .. } => work_order_id,
        }
    }

    /// 工单需求行（工单未找到时为空）
    pub fn demand_lines(&self) -> &[DemandLine] {
        match self {
            WorkOrderLookup::WorkOrderNotFound { .. } => &[],
            WorkOrderLookup::NoPickListData { demand_lines, .. }
            | WorkOrderLookup::Found { demand_lines, .. } => demand_lines,
        }
    }

    pub fn pick_list(&self) -> &[AllocationRecord] {
        match self {
            WorkOrderLookup::Found { pick_list, .. } => pick_list,
            _ => &[],
        }
    }
}

pub struct WorkOrderNavigator;

impl WorkOrderNavigator {
    /// 查询工单详情及其拣货行
    #[instrument(skip(config), fields(demand_file = %config.demand_file.display()))]
    pub fn lookup(config: &AllocationConfig, work_order_id: &str) -> PipelineResult<WorkOrderLookup> {
        let work_order_id = normalize_key(work_order_id);

        // === 步骤 1: 需求表 ===
        let importer = TableImporter::with_defaults(config.valid_location_categories.clone());
        let demand_lines: Vec<DemandLine> = importer
            .import_demand(&config.demand_file)?
            .records
            .into_iter()
            .filter(|line| line.work_order_id == work_order_id)
            .collect();

        if demand_lines.is_empty() {
            warn!(work_order_id = %work_order_id, "需求表中未找到工单");
            return Ok(WorkOrderLookup::WorkOrderNotFound { work_order_id });
        }

        // === 步骤 2: 拣货清单 ===
        let pick_list = PickListReader::find_by_work_order(&config.output_file, &work_order_id)?;
        if pick_list.is_empty() {
            warn!(work_order_id = %work_order_id, demand_lines = demand_lines.len(), "工单无拣货数据");
            return Ok(WorkOrderLookup::NoPickListData {
                work_order_id,
                demand_lines,
            });
        }

        info!(
            work_order_id = %work_order_id,
            demand_lines = demand_lines.len(),
            pick_rows = pick_list.len(),
            "工单查询完成"
        );
        Ok(WorkOrderLookup::Found {
            work_order_id,
            demand_lines,
            pick_list,
        })
    }
}
