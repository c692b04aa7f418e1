// ==========================================
// 工单拣货清单系统 - 领域类型定义
// ==========================================
// 职责: 来源标记 / 替代层级 / 分配状态 / 替代料策略
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 需求行来源标记 (Origin Flag)
// ==========================================
// 源数据 ORIG_CODE: 'S' = 引擎合成的替代行，其他值 = 原始行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginFlag {
    Original,   // 源数据行
    Substitute, // 分配过程中追加的替代行
}

impl OriginFlag {
    /// 从源数据 ORIG_CODE 解析
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_uppercase()) {
            Some(c) if c == "S" => OriginFlag::Substitute,
            _ => OriginFlag::Original,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            OriginFlag::Original => "O",
            OriginFlag::Substitute => "S",
        }
    }
}

impl fmt::Display for OriginFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginFlag::Original => write!(f, "ORIGINAL"),
            OriginFlag::Substitute => write!(f, "SUBSTITUTE"),
        }
    }
}

// ==========================================
// 替代规则层级 (Swap Level)
// ==========================================
// 源数据列 "Swap Level": Project / Batch / Work Order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapLevel {
    #[serde(rename = "Project")]
    Project,
    #[serde(rename = "Batch")]
    Batch,
    #[serde(rename = "Work Order")]
    WorkOrder,
}

impl SwapLevel {
    /// 解析层级文本（大小写/空白不敏感）
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        match normalized.as_str() {
            "project" => Some(SwapLevel::Project),
            "batch" => Some(SwapLevel::Batch),
            "work order" | "workorder" => Some(SwapLevel::WorkOrder),
            _ => None,
        }
    }
}

impl fmt::Display for SwapLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapLevel::Project => write!(f, "Project"),
            SwapLevel::Batch => write!(f, "Batch"),
            SwapLevel::WorkOrder => write!(f, "Work Order"),
        }
    }
}

// ==========================================
// 分配状态 (Allocation Status)
// ==========================================
// 按需求行的累计分配量与需求量比较得出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllocationStatus {
    #[serde(rename = "Fully Allocated")]
    FullyAllocated,
    #[serde(rename = "Partially Allocated")]
    PartiallyAllocated,
    #[serde(rename = "Not Allocated")]
    NotAllocated,
}

impl AllocationStatus {
    /// 由累计分配量与需求量计算状态
    pub fn from_totals(allocated: Decimal, requested: Decimal) -> Self {
        if allocated == requested {
            AllocationStatus::FullyAllocated
        } else if allocated > Decimal::ZERO {
            AllocationStatus::PartiallyAllocated
        } else {
            AllocationStatus::NotAllocated
        }
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationStatus::FullyAllocated => write!(f, "Fully Allocated"),
            AllocationStatus::PartiallyAllocated => write!(f, "Partially Allocated"),
            AllocationStatus::NotAllocated => write!(f, "Not Allocated"),
        }
    }
}

// ==========================================
// 替代行处理策略 (Substitute Policy)
// ==========================================
// 默认 SkipSubstitutes: 替代行只作为替代料标识，不参与库存分配
// AllocateSubstitutes: 替代行按自身物料直接分配，不再递归寻找替代
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubstitutePolicy {
    #[default]
    SkipSubstitutes,
    AllocateSubstitutes,
}

impl fmt::Display for SubstitutePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubstitutePolicy::SkipSubstitutes => write!(f, "SKIP_SUBSTITUTES"),
            SubstitutePolicy::AllocateSubstitutes => write!(f, "ALLOCATE_SUBSTITUTES"),
        }
    }
}
