// ==========================================
// 工单拣货清单系统 - 物料替代解析器
// ==========================================
// 输入: 需求物料号 + 工单号 / 项目号 / 批号
// 输出: 有效物料号（无命中规则时原样返回）
// 红线: 同一原物料只取规则表中第一条命中规则
// ==========================================

use crate::domain::OverrideRule;
use std::collections::HashMap;
use tracing::debug;

// ==========================================
// OverrideResolver - 替代规则解析器
// ==========================================
// 规则按原物料号分组，组内保持规则表顺序
#[derive(Debug, Default)]
pub struct OverrideResolver {
    rules_by_item: HashMap<i64, Vec<OverrideRule>>,
    rule_count: usize,
}

impl OverrideResolver {
    /// 由规则表构建（只构建一次，解析过程不修改）
    pub fn new(rules: Vec<OverrideRule>) -> Self {
        let rule_count = rules.len();
        let mut rules_by_item: HashMap<i64, Vec<OverrideRule>> = HashMap::new();
        for rule in rules {
            rules_by_item
                .entry(rule.original_item_id)
                .or_default()
                .push(rule);
        }
        Self {
            rules_by_item,
            rule_count,
        }
    }

    pub fn len(&self) -> usize {
        self.rule_count
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }

    /// 查找对需求行生效的替代规则
    ///
    /// 规则只按自身层级的范围键匹配；多条命中时取规则表中靠前者
    pub fn matching_rule(
        &self,
        item_id: i64,
        work_order_id: &str,
        project_number: Option<&str>,
        batch_number: Option<&str>,
    ) -> Option<&OverrideRule> {
        self.rules_by_item.get(&item_id).and_then(|candidates| {
            candidates
                .iter()
                .find(|rule| rule.matches_scope(work_order_id, project_number, batch_number))
        })
    }

    /// 解析有效物料号
    pub fn resolve(
        &self,
        item_id: i64,
        work_order_id: &str,
        project_number: Option<&str>,
        batch_number: Option<&str>,
    ) -> i64 {
        match self.matching_rule(item_id, work_order_id, project_number, batch_number) {
            Some(rule) => {
                debug!(
                    work_order_id,
                    original_item_id = item_id,
                    substitute_item_id = rule.substitute_item_id,
                    level = %rule.level,
                    rule_row = rule.row_number,
                    "命中物料替代规则"
                );
                rule.substitute_item_id
            }
            None => item_id,
        }
    }
}
