// ==========================================
// 工单拣货清单系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: 表头 + 行记录（列名 → 去空白后的文本）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::table_importer_trait::FileParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行（row_number 为表格中的行号，表头占第 1 行）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub row_number: usize,
    pub values: HashMap<String, String>,
}

/// 原始表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// 缺失的必需列
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|col| !self.headers.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect()
    }

    fn push_row(&mut self, row_number: usize, cells: impl Iterator<Item = String>) {
        let mut values = HashMap::new();
        for (col_idx, value) in cells.enumerate() {
            if let Some(header) = self.headers.get(col_idx) {
                values.insert(header.clone(), value);
            }
        }

        // 跳过完全空白的行
        if values.values().all(|v| v.is_empty()) {
            return;
        }

        self.rows.push(RawRow { row_number, values });
    }
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse(&self, path: &Path) -> ImportResult<RawTable> {
        ensure_exists(path)?;

        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut table = RawTable {
            headers: reader
                .headers()?
                .iter()
                .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
                .collect(),
            rows: Vec::new(),
        };

        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            table.push_row(idx + 2, record.iter().map(|v| v.trim().to_string()));
        }

        Ok(table)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 只读取第一个工作表
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse(&self, path: &Path) -> ImportResult<RawTable> {
        ensure_exists(path)?;

        let ext = extension_of(path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let mut table = RawTable {
            headers: header_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect(),
            rows: Vec::new(),
        };

        for (idx, data_row) in rows.enumerate() {
            table.push_row(idx + 2, data_row.iter().map(|cell| cell.to_string().trim().to_string()));
        }

        Ok(table)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse(&self, path: &Path) -> ImportResult<RawTable> {
        match extension_of(path).as_str() {
            "csv" => CsvParser.parse(path),
            "xlsx" | "xls" => ExcelParser.parse(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
