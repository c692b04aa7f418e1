// ==========================================
// 工单拣货清单系统 - 表格导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 文件解析 → 字段映射 → 过滤
// ==========================================

use crate::domain::{DemandLine, InventoryLot, OverrideRule};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawTable;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 非空行
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse(&self, path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 实现者: FieldMapper
// 行级错误（ImportError::is_row_level）由调用方丢弃该行
pub trait FieldMapper: Send + Sync {
    /// 工单需求行
    fn map_demand(&self, row: &HashMap<String, String>, row_number: usize)
        -> ImportResult<DemandLine>;

    /// 库存批次
    fn map_inventory(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<InventoryLot>;

    /// 物料替代规则
    fn map_override(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<OverrideRule>;
}
