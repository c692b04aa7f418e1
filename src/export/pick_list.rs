// ==========================================
// 工单拣货清单系统 - 拣货清单读写
// ==========================================
// 写: 拣货清单 / 缺料清单 → CSV（列名与既有 Pick List 一致）
// 读: 按工单号回查拣货清单（工单导航查询）
// ==========================================

use crate::domain::{AllocationRecord, Shortfall};
use crate::export::error::{ExportError, ExportResult};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument};

/// 拣货清单表头
pub const PICK_LIST_HEADERS: &[&str] = &[
    "Project ID",
    "Production Batch Number",
    "Custom Data",
    "WORKORDER_ID",
    "SEQ_NUM",
    "ITEM_ID",
    "TOTAL_QTY_TO_PICK",
    "LOT_QTY_TO_PICK",
    "SKIDID",
    "LOTID",
    "LOC_ID",
    "Expiration Date",
    "Item Description",
    "Stock UoM",
    "SOURCE_SITE_ID",
    "TARGET_SITE_ID",
    "SCHED_DATETIME",
    "UNFULFILLED_QTY",
    "ALLOCATION_STATUS",
];

/// 缺料清单表头
pub const SHORTAGE_HEADERS: &[&str] = &[
    "WORKORDER_ID",
    "SEQ_NUM",
    "REQUESTED_ITEM_ID",
    "ITEM_ID",
    "SITE_ID",
    "TOTAL_QTY_TO_PICK",
    "ALLOCATED_QTY",
    "UNFULFILLED_QTY",
    "ALLOCATION_STATUS",
    "SUBSTITUTE_ITEM_ID",
];

// ==========================================
// PickListWriter
// ==========================================
pub struct PickListWriter;

impl PickListWriter {
    /// 写出拣货清单（按生成顺序），返回写出行数
    #[instrument(skip(path, records), fields(path = %path.display(), count = records.len()))]
    pub fn write_records(path: &Path, records: &[AllocationRecord]) -> ExportResult<usize> {
        let written = write_rows(path, PICK_LIST_HEADERS, records)?;
        info!(rows = written, "拣货清单已写出");
        Ok(written)
    }

    /// 写出缺料清单
    #[instrument(skip(path, shortfalls), fields(path = %path.display(), count = shortfalls.len()))]
    pub fn write_shortfalls(path: &Path, shortfalls: &[Shortfall]) -> ExportResult<usize> {
        let written = write_rows(path, SHORTAGE_HEADERS, shortfalls)?;
        info!(rows = written, "缺料清单已写出");
        Ok(written)
    }
}

/// 表头单独写出，空清单也保留表头
fn write_rows<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> ExportResult<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}

// ==========================================
// PickListReader
// ==========================================
pub struct PickListReader;

impl PickListReader {
    /// 读取完整拣货清单
    pub fn read_all(path: &Path) -> ExportResult<Vec<AllocationRecord>> {
        if !path.exists() {
            return Err(ExportError::FileNotFound(path.display().to_string()));
        }

        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: AllocationRecord = result?;
            records.push(record);
        }
        Ok(records)
    }

    /// 按工单号查询拣货行（保持清单原顺序）
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn find_by_work_order(path: &Path, work_order_id: &str) -> ExportResult<Vec<AllocationRecord>> {
        let wanted = work_order_id.trim();
        let records: Vec<AllocationRecord> = Self::read_all(path)?
            .into_iter()
            .filter(|record| record.work_order_id.trim() == wanted)
            .collect();
        info!(work_order_id = wanted, rows = records.len(), "工单拣货行查询完成");
        Ok(records)
    }
}
