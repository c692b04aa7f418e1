// ==========================================
// 工单拣货清单系统 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 领域结构 + 类型转换
// 红线: 类型校验只在这里做一次，引擎不再校验
// ==========================================

use crate::domain::{DemandLine, InventoryLot, OriginFlag, OverrideRule, SwapLevel};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::table_importer_trait::FieldMapper as FieldMapperTrait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// 源表列名
pub mod columns {
    // ===== 工单需求表 =====
    pub const SCHED_DATETIME: &str = "SCHED_DATETIME";
    pub const COMP_ITEMID: &str = "COMP_ITEMID";
    pub const WORKORDER_ID: &str = "WORKORDER_ID";
    pub const SITE_ID: &str = "SITE_ID";
    pub const QTY: &str = "QTY";
    pub const SEQ_NUM: &str = "SEQ_NUM";
    pub const ORIG_CODE: &str = "ORIG_CODE";
    pub const ORIG_SEQ_NUM: &str = "ORIG_SEQ_NUM";
    pub const PROJECT_NUMBER: &str = "PROJECT_NUMBER";
    pub const PROD_BATCH_NUM: &str = "PROD_BATCH_NUM";
    pub const CUSTOM_DATA1: &str = "CUSTOM_DATA1";

    // ===== 库存表 =====
    pub const ITEM_ID: &str = "ITEM_ID";
    pub const QTYTOTAL: &str = "QTYTOTAL";
    pub const EXPDATE: &str = "EXPDATE";
    pub const SKIDID: &str = "SKIDID";
    pub const LOTID: &str = "LOTID";
    pub const LOC_ID: &str = "LOC_ID";
    pub const ITEMDESC: &str = "ITEMDESC";
    pub const STOCK_UOM: &str = "STOCK_UOM";

    // ===== 替代规则表 =====
    pub const SWAP_LEVEL: &str = "Swap Level";
    pub const PROJECT_NUMBER_OVERRIDE: &str = "Project Number";
    pub const WORK_ORDER_ID_OVERRIDE: &str = "Work Order ID";
    pub const BATCH_NUMBER_OVERRIDE: &str = "Production Batch Number";
    pub const ORIGINAL_ITEM: &str = "Original KBI Item Number";
    pub const SUBSTITUTE_ITEM: &str = "Substitute KBI Item Number";
}

use columns::*;

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_demand(&self, row: &HashMap<String, String>, row_number: usize) -> ImportResult<DemandLine> {
        Ok(DemandLine {
            // 标识
            work_order_id: self.require_key(row, WORKORDER_ID, row_number)?,
            seq_num: self.require_u32(row, SEQ_NUM, row_number)?,

            // 范围键
            project_number: self.get_key(row, PROJECT_NUMBER),
            batch_number: self.get_key(row, PROD_BATCH_NUM),
            site_id: self.require_i32(row, SITE_ID, row_number)?,

            // 需求
            item_id: self.require_i64(row, COMP_ITEMID, row_number)?,
            qty: self.require_decimal(row, QTY, row_number)?,
            sched_datetime: self.require_datetime(row, SCHED_DATETIME, row_number)?,

            // 替代
            origin: OriginFlag::from_code(self.get_string(row, ORIG_CODE).as_deref()),
            orig_seq_num: self.parse_u32(row, ORIG_SEQ_NUM, row_number)?,

            custom_data: self.get_string(row, CUSTOM_DATA1),
            row_number,
        })
    }

    fn map_inventory(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<InventoryLot> {
        let remaining_qty = self.require_decimal(row, QTYTOTAL, row_number)?;
        if remaining_qty < Decimal::ZERO {
            return Err(ImportError::ValueRangeError {
                row: row_number,
                field: QTYTOTAL.to_string(),
                value: remaining_qty.to_string(),
            });
        }

        Ok(InventoryLot {
            lot_id: self.require_key(row, LOTID, row_number)?,
            skid_id: self.get_key(row, SKIDID).unwrap_or_default(),
            loc_id: self.get_key(row, LOC_ID).unwrap_or_default(),
            site_id: self.require_i32(row, SITE_ID, row_number)?,
            item_id: self.require_i64(row, ITEM_ID, row_number)?,
            remaining_qty,
            expiration_date: self.parse_date(row, EXPDATE, row_number)?,
            description: self.get_string(row, ITEMDESC),
            stock_uom: self.get_string(row, STOCK_UOM),
            location_category: self.get_string(row, CUSTOM_DATA1),
            row_number,
        })
    }

    fn map_override(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<OverrideRule> {
        let level_text = self
            .get_string(row, SWAP_LEVEL)
            .ok_or_else(|| ImportError::RequiredFieldMissing {
                row: row_number,
                field: SWAP_LEVEL.to_string(),
            })?;
        let level = SwapLevel::parse(&level_text).ok_or(ImportError::InvalidSwapLevel {
            row: row_number,
            value: level_text,
        })?;

        Ok(OverrideRule {
            level,
            project_number: self.get_key(row, PROJECT_NUMBER_OVERRIDE),
            work_order_id: self.get_key(row, WORK_ORDER_ID_OVERRIDE),
            batch_number: self.get_key(row, BATCH_NUMBER_OVERRIDE),
            original_item_id: self.require_i64(row, ORIGINAL_ITEM, row_number)?,
            substitute_item_id: self.require_i64(row, SUBSTITUTE_ITEM, row_number)?,
            row_number,
        })
    }
}

impl FieldMapper {
    /// 提取字符串字段（空白视为缺失），支持列名别名
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        let aliases: &[&str] = match key {
            WORKORDER_ID => &[WORKORDER_ID, "WORK_ORDER_ID"],
            ORIG_SEQ_NUM => &[ORIG_SEQ_NUM, "SUB_SEQ_NUM"],
            STOCK_UOM => &[STOCK_UOM, "UOM"],
            _ => &[],
        };

        std::iter::once(key)
            .chain(aliases.iter().copied())
            .filter_map(|alias| row.get(alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// 提取匹配用的键值（工单号/项目号/批号等）
    ///
    /// Excel 数值单元格可能带 ".0" 后缀，统一去掉以便跨表比较
    fn get_key(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        self.get_string(row, key).map(|v| normalize_key(&v))
    }

    fn require_key(&self, row: &HashMap<String, String>, key: &str, row_number: usize) -> ImportResult<String> {
        self.get_key(row, key).ok_or_else(|| missing(row_number, key))
    }

    fn parse_i64(&self, row: &HashMap<String, String>, key: &str, row_number: usize) -> ImportResult<Option<i64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => parse_integral(&value).map(Some).ok_or_else(|| {
                ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为整数: {}", value),
                }
            }),
        }
    }

    fn require_i64(&self, row: &HashMap<String, String>, key: &str, row_number: usize) -> ImportResult<i64> {
        self.parse_i64(row, key, row_number)?
            .ok_or_else(|| missing(row_number, key))
    }

    fn require_i32(&self, row: &HashMap<String, String>, key: &str, row_number: usize) -> ImportResult<i32> {
        let value = self.require_i64(row, key, row_number)?;
        i32::try_from(value).map_err(|_| out_of_range(row_number, key, value))
    }

    fn parse_u32(&self, row: &HashMap<String, String>, key: &str, row_number: usize) -> ImportResult<Option<u32>> {
        match self.parse_i64(row, key, row_number)? {
            None => Ok(None),
            Some(value) => u32::try_from(value)
                .map(Some)
                .map_err(|_| out_of_range(row_number, key, value)),
        }
    }

    fn require_u32(&self, row: &HashMap<String, String>, key: &str, row_number: usize) -> ImportResult<u32> {
        self.parse_u32(row, key, row_number)?
            .ok_or_else(|| missing(row_number, key))
    }

    fn require_decimal(&self, row: &HashMap<String, String>, key: &str, row_number: usize) -> ImportResult<Decimal> {
        let value = self
            .get_string(row, key)
            .ok_or_else(|| missing(row_number, key))?;
        value
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(&value))
            .map_err(|_| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为数量: {}", value),
            })
    }

    fn parse_date(&self, row: &HashMap<String, String>, key: &str, row_number: usize) -> ImportResult<Option<NaiveDate>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => parse_date_text(&value)
                .map(Some)
                .ok_or(ImportError::DateFormatError {
                    row: row_number,
                    field: key.to_string(),
                    value,
                }),
        }
    }

    fn require_datetime(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<NaiveDateTime> {
        let value = self
            .get_string(row, key)
            .ok_or_else(|| missing(row_number, key))?;
        parse_datetime_text(&value).ok_or(ImportError::DateFormatError {
            row: row_number,
            field: key.to_string(),
            value,
        })
    }
}

fn missing(row: usize, field: &str) -> ImportError {
    ImportError::RequiredFieldMissing {
        row,
        field: field.to_string(),
    }
}

fn out_of_range(row: usize, field: &str, value: i64) -> ImportError {
    ImportError::ValueRangeError {
        row,
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// 去掉整数值的 ".0" 后缀
pub fn normalize_key(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.strip_suffix(".0") {
        Some(head) if !head.is_empty() && head.chars().all(|c| c.is_ascii_digit() || c == '-') => {
            head.to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// 解析整数，接受整值浮点文本（如 "100234.0"）
pub fn parse_integral(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    let float = trimmed.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

/// Excel 序列日期 → 日期时间（1900 日期系统，基准 1899-12-30）
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial <= 0.0 || serial >= 2_958_466.0 {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    base.checked_add_signed(Duration::seconds(seconds))
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y%m%d%H%M%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

/// 解析日期时间文本；纯日期按零点处理，纯数字按 Excel 序列日期处理
pub fn parse_datetime_text(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .or_else(|| trimmed.parse::<f64>().ok().and_then(excel_serial_to_datetime))
}

/// 解析日期文本（带时间部分时取日期）
pub fn parse_date_text(value: &str) -> Option<NaiveDate> {
    parse_datetime_text(value).map(|dt| dt.date())
}
