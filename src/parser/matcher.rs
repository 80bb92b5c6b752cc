//! 共享匹配逻辑
//! 所有分类解析器共用的“首条命中即返回”算法与字段提取
//!
//! 规则表顺序即优先级：按表顺序逐条测试，第一条命中的规则决定结果，
//! 之后的规则不再参与评估。规则作者通过排序表达特异性，而不是打分。

use crate::compiler::{CompiledRule, CompiledRuleTable, CompiledSubRule, RuleCaptures};
use crate::utils::TemplateExpander;

/// 主规则命中结果
#[derive(Debug)]
pub struct RuleMatch<'t, 'u> {
    /// 命中规则在表内的下标
    pub index: usize,
    pub rule: &'t CompiledRule,
    pub captures: RuleCaptures<'u>,
}

impl<'t, 'u> RuleMatch<'t, 'u> {
    /// 展开主规则模板，模板缺失返回空串
    pub fn expand(&self, template: Option<&str>) -> String {
        template
            .map(|t| TemplateExpander::expand(t, &self.captures))
            .unwrap_or_default()
    }

    /// 提取版本号
    /// 主规则版本展开为空时，按顺序尝试 `versions` 子规则，第一条命中的子规则整体替换版本号
    pub fn version(&self, input: &str) -> String {
        let primary = self
            .rule
            .version
            .as_deref()
            .map(|t| TemplateExpander::expand_version(t, &self.captures))
            .unwrap_or_default();
        if !primary.is_empty() {
            return primary;
        }

        first_sub_match(&self.rule.versions, input)
            .and_then(|(sub, captures)| {
                sub.version
                    .as_deref()
                    .map(|t| TemplateExpander::expand_version(t, &captures))
            })
            .unwrap_or_default()
    }
}

/// 在规则表中查找第一条命中的规则
pub fn first_match<'t, 'u>(table: &'t CompiledRuleTable, input: &'u str) -> Option<RuleMatch<'t, 'u>> {
    // 预判集合给出第一条可能命中的下标，之前的规则必然不命中
    let start = table.first_candidate(input)?;

    table
        .rules
        .iter()
        .enumerate()
        .skip(start)
        .find_map(|(index, rule)| {
            rule.regex
                .captures(input)
                .map(|captures| RuleMatch { index, rule, captures })
        })
}

/// 在子规则序列中查找第一条命中的子规则
pub fn first_sub_match<'s, 'u>(
    sub_rules: &'s [CompiledSubRule],
    input: &'u str,
) -> Option<(&'s CompiledSubRule, RuleCaptures<'u>)> {
    sub_rules
        .iter()
        .find_map(|sub| sub.regex.captures(input).map(|captures| (sub, captures)))
}
