// ==========================================
// 工单拣货清单系统 - 拣货清单生成流水线
// ==========================================
// 流程:
// 1. 并行导入 工单需求 / 库存批次 / 替代规则 三张表
// 2. 构建替代规则解析器与批次池
// 3. 执行分配引擎
// 4. 写出拣货清单（及缺料清单）
// ==========================================

use crate::app::error::PipelineResult;
use crate::config::AllocationConfig;
use crate::engine::{AllocationEngine, AllocationStats, LotPool, OverrideResolver};
use crate::export::PickListWriter;
use crate::importer::{ImportResult, ImportSummary, Imported, TableImporter};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// RunReport - 运行报告
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub imports: Vec<ImportSummary>,
    pub override_rules: usize,
    pub stats: AllocationStats,

    // ===== 输出 =====
    pub output_file: PathBuf,
    pub records_written: usize,
    pub shortage_file: Option<PathBuf>,
    pub shortfalls_written: usize,

    // 分配结束后仍有余量的批次数
    pub lots_remaining: usize,
    pub elapsed_ms: u128,
}

// ==========================================
// PickListPipeline
// ==========================================
pub struct PickListPipeline;

impl PickListPipeline {
    /// 执行一次完整的拣货清单生成
    #[instrument(skip_all, fields(
        demand_file = %config.demand_file.display(),
        output_file = %config.output_file.display()
    ))]
    pub async fn run(config: &AllocationConfig) -> PipelineResult<RunReport> {
        let start = Instant::now();
        let run_id = Uuid::new_v4();
        info!(%run_id, "开始生成拣货清单");

        // === 步骤 1: 三表并行导入 ===
        let importer = Arc::new(TableImporter::with_defaults(
            config.valid_location_categories.clone(),
        ));
        let (demand, inventory, overrides) = tokio::try_join!(
            import_blocking(importer.clone(), config.demand_file.clone(), |imp, path| {
                imp.import_demand(path)
            }),
            import_blocking(importer.clone(), config.inventory_file.clone(), |imp, path| {
                imp.import_inventory(path)
            }),
            import_blocking(importer.clone(), config.override_file.clone(), |imp, path| {
                imp.import_overrides(path)
            }),
        )?;

        let imports = vec![demand.summary, inventory.summary, overrides.summary];

        // === 步骤 2: 解析器 + 批次池 ===
        let resolver = OverrideResolver::new(overrides.records);
        let override_rules = resolver.len();
        let mut pool = LotPool::build(inventory.records);

        // === 步骤 3: 分配 ===
        let engine = AllocationEngine::new(config.site_routing(), config.substitute_policy);
        let run = engine.run(demand.records, &mut pool, &resolver);

        if !run.shortfalls.is_empty() {
            warn!(shortfalls = run.shortfalls.len(), "存在未满足的需求行");
        }

        // === 步骤 4: 写出 ===
        let records_written = PickListWriter::write_records(&config.output_file, &run.records)?;
        let shortfalls_written = match &config.shortage_file {
            Some(path) => PickListWriter::write_shortfalls(path, &run.shortfalls)?,
            None => 0,
        };

        let report = RunReport {
            run_id,
            imports,
            override_rules,
            stats: run.stats,
            output_file: config.output_file.clone(),
            records_written,
            shortage_file: config.shortage_file.clone(),
            shortfalls_written,
            lots_remaining: pool.remaining_lots().len(),
            elapsed_ms: start.elapsed().as_millis(),
        };

        info!(
            %run_id,
            records = report.records_written,
            shortfalls = report.stats.partially_allocated + report.stats.not_allocated,
            elapsed_ms = report.elapsed_ms,
            "拣货清单生成完成"
        );

        Ok(report)
    }
}

/// 在阻塞线程池中执行单表导入（文件 IO + 解析）
async fn import_blocking<T, F>(
    importer: Arc<TableImporter>,
    path: PathBuf,
    import: F,
) -> PipelineResult<Imported<T>>
where
    T: Send + 'static,
    F: FnOnce(&TableImporter, &Path) -> ImportResult<Imported<T>> + Send + 'static,
{
    let imported = tokio::task::spawn_blocking(move || import(&importer, &path)).await??;
    Ok(imported)
}
