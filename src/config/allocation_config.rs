// ==========================================
// 工单拣货清单系统 - 分配运行配置
// ==========================================
// 存储: JSON 文件（缺省字段取默认值）
// ==========================================

use crate::domain::SubstitutePolicy;
use crate::engine::{SiteRouting, DEFAULT_ALTERNATE_SITE_ID, DEFAULT_SECONDARY_SITE_ID};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 默认库位类别白名单
pub const DEFAULT_LOCATION_CATEGORIES: &[&str] = &[
    "CMF Warehouse",
    "CMF Warehouse - Cold",
    "W1",
    "W2",
    "W3",
    "W4",
];

fn default_demand_file() -> PathBuf {
    PathBuf::from("Work Orders.xlsx")
}

fn default_inventory_file() -> PathBuf {
    PathBuf::from("Inventory.xlsx")
}

fn default_override_file() -> PathBuf {
    PathBuf::from("Planners WO BOM Swaps List.xlsx")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("Pick List.csv")
}

fn default_location_categories() -> Vec<String> {
    DEFAULT_LOCATION_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_secondary_site_id() -> i32 {
    DEFAULT_SECONDARY_SITE_ID
}

fn default_alternate_site_id() -> i32 {
    DEFAULT_ALTERNATE_SITE_ID
}

/// 分配运行配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationConfig {
    // ===== 输入 =====
    /// 工单需求表
    #[serde(default = "default_demand_file")]
    pub demand_file: PathBuf,

    /// 库存表
    #[serde(default = "default_inventory_file")]
    pub inventory_file: PathBuf,

    /// 计划员 BOM 替换清单
    #[serde(default = "default_override_file")]
    pub override_file: PathBuf,

    // ===== 输出 =====
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// 缺料清单（可选）
    #[serde(default)]
    pub shortage_file: Option<PathBuf>,

    // ===== 分配规则 =====
    #[serde(default = "default_location_categories")]
    pub valid_location_categories: Vec<String>,

    #[serde(default = "default_secondary_site_id")]
    pub secondary_site_id: i32,

    #[serde(default = "default_alternate_site_id")]
    pub alternate_site_id: i32,

    #[serde(default)]
    pub substitute_policy: SubstitutePolicy,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            demand_file: default_demand_file(),
            inventory_file: default_inventory_file(),
            override_file: default_override_file(),
            output_file: default_output_file(),
            shortage_file: None,
            valid_location_categories: default_location_categories(),
            secondary_site_id: default_secondary_site_id(),
            alternate_site_id: default_alternate_site_id(),
            substitute_policy: SubstitutePolicy::default(),
        }
    }
}

impl AllocationConfig {
    pub fn site_routing(&self) -> SiteRouting {
        SiteRouting {
            secondary_site_id: self.secondary_site_id,
            alternate_site_id: self.alternate_site_id,
        }
    }
}
