// ==========================================
// 工单拣货清单系统 - 表格导入器实现
// ==========================================
// 流程: 解析 → 必需列校验 → 字段映射（坏行丢弃）→ 库位类别过滤
// ==========================================

use crate::domain::{DemandLine, InventoryLot, OverrideRule};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::columns::*;
use crate::importer::field_mapper::FieldMapper as DefaultFieldMapper;
use crate::importer::file_parser::{RawRow, UniversalFileParser};
use crate::importer::table_importer_trait::{FieldMapper, FileParser};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument, warn};

// ==========================================
// 表类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Demand,
    Inventory,
    Overrides,
}

impl TableKind {
    /// 必需列（缺任一列则整表导入失败）
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::Demand => &[
                SCHED_DATETIME,
                COMP_ITEMID,
                WORKORDER_ID,
                SITE_ID,
                QTY,
                SEQ_NUM,
                ORIG_CODE,
                PROJECT_NUMBER,
                PROD_BATCH_NUM,
            ],
            TableKind::Inventory => &[
                ITEM_ID,
                QTYTOTAL,
                EXPDATE,
                SKIDID,
                LOTID,
                LOC_ID,
                ITEMDESC,
                SITE_ID,
                CUSTOM_DATA1,
            ],
            TableKind::Overrides => &[
                SWAP_LEVEL,
                PROJECT_NUMBER_OVERRIDE,
                WORK_ORDER_ID_OVERRIDE,
                BATCH_NUMBER_OVERRIDE,
                ORIGINAL_ITEM,
                SUBSTITUTE_ITEM,
            ],
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Demand => write!(f, "work_orders"),
            TableKind::Inventory => write!(f, "inventory"),
            TableKind::Overrides => write!(f, "overrides"),
        }
    }
}

// ==========================================
// 导入结果
// ==========================================

/// 单表导入汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub table: TableKind,
    pub file_path: String,
    pub total_rows: usize,
    pub imported_rows: usize,
    pub rejected_rows: usize, // 映射失败被丢弃
    pub filtered_rows: usize, // 库位类别不在白名单
    pub elapsed_ms: u128,
}

/// 单表导入结果
#[derive(Debug, Clone)]
pub struct Imported<T> {
    pub records: Vec<T>,
    pub summary: ImportSummary,
}

// ==========================================
// TableImporter - 表格导入器
// ==========================================
pub struct TableImporter {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    valid_location_categories: Vec<String>,
}

impl TableImporter {
    pub fn new(
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        valid_location_categories: Vec<String>,
    ) -> Self {
        Self {
            file_parser,
            field_mapper,
            valid_location_categories,
        }
    }

    /// 默认组件（按扩展名解析 + 标准字段映射）
    pub fn with_defaults(valid_location_categories: Vec<String>) -> Self {
        Self::new(
            Box::new(UniversalFileParser),
            Box::new(DefaultFieldMapper),
            valid_location_categories,
        )
    }

    /// 导入工单需求表
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn import_demand<P: AsRef<Path>>(&self, path: P) -> ImportResult<Imported<DemandLine>> {
        self.import_table(path.as_ref(), TableKind::Demand, |row| {
            self.field_mapper.map_demand(&row.values, row.row_number)
        })
    }

    /// 导入库存表（只保留白名单库位类别）
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn import_inventory<P: AsRef<Path>>(&self, path: P) -> ImportResult<Imported<InventoryLot>> {
        let mut imported = self.import_table(path.as_ref(), TableKind::Inventory, |row| {
            self.field_mapper.map_inventory(&row.values, row.row_number)
        })?;

        let before = imported.records.len();
        imported.records.retain(|lot| self.is_valid_location(lot));
        let filtered = before - imported.records.len();

        if filtered > 0 {
            info!(filtered, "按库位类别过滤库存批次");
        }
        imported.summary.filtered_rows = filtered;
        imported.summary.imported_rows = imported.records.len();
        Ok(imported)
    }

    /// 导入物料替代规则表
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn import_overrides<P: AsRef<Path>>(&self, path: P) -> ImportResult<Imported<OverrideRule>> {
        self.import_table(path.as_ref(), TableKind::Overrides, |row| {
            self.field_mapper.map_override(&row.values, row.row_number)
        })
    }

    fn is_valid_location(&self, lot: &InventoryLot) -> bool {
        lot.location_category
            .as_deref()
            .is_some_and(|category| self.valid_location_categories.iter().any(|c| c == category))
    }

    fn import_table<T, F>(&self, path: &Path, kind: TableKind, map_row: F) -> ImportResult<Imported<T>>
    where
        F: Fn(&RawRow) -> ImportResult<T>,
    {
        let start_time = Instant::now();

        // === 步骤 1: 解析文件 ===
        let table = self.file_parser.parse(path)?;

        // === 步骤 2: 必需列校验 ===
        let missing = table.missing_columns(kind.required_columns());
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns {
                table: kind.to_string(),
                columns: missing,
            });
        }

        // === 步骤 3: 字段映射 ===
        let total_rows = table.rows.len();
        let mut records = Vec::with_capacity(total_rows);
        let mut rejected_by_field: HashMap<String, usize> = HashMap::new();
        for row in &table.rows {
            match map_row(row) {
                Ok(record) => records.push(record),
                Err(e) if e.is_row_level() => {
                    warn!(table = %kind, row_number = row.row_number, error = %e, "丢弃无效行");
                    *rejected_by_field.entry(rejected_field(&e)).or_default() += 1;
                }
                Err(e) => return Err(e),
            }
        }

        let rejected_rows = total_rows - records.len();
        let summary = ImportSummary {
            table: kind,
            file_path: path.display().to_string(),
            total_rows,
            imported_rows: records.len(),
            rejected_rows,
            filtered_rows: 0,
            elapsed_ms: start_time.elapsed().as_millis(),
        };

        info!(
            table = %kind,
            total = total_rows,
            imported = summary.imported_rows,
            rejected = rejected_rows,
            rejected_by_field = ?rejected_by_field,
            "表格导入完成"
        );

        Ok(Imported { records, summary })
    }
}

fn rejected_field(err: &ImportError) -> String {
    match err {
        ImportError::RequiredFieldMissing { field, .. }
        | ImportError::TypeConversionError { field, .. }
        | ImportError::DateFormatError { field, .. }
        | ImportError::ValueRangeError { field, .. } => field.clone(),
        ImportError::InvalidSwapLevel { .. } => SWAP_LEVEL.to_string(),
        _ => "other".to_string(),
    }
}
