//! 规则编译器核心
//! 仅负责将原始规则表编译为可执行的正则模式

use std::time::Instant;
use regex::{RegexBuilder, RegexSet, RegexSetBuilder};
use tracing::debug;

use super::pattern::{CompiledRule, CompiledRuleTable, CompiledSubRule, RulePattern};
use crate::error::{DdResult, DeviceDetectorError};
use crate::rule::model::{RawRule, RawSubRule, RuleTable};
use crate::rule::record::DeviceType;

/// 规则正则前缀：要求命中位置位于字符串开头或非标识符字符之后
/// 仅为非捕获分组，规则中的 `$1`/`$2` 分组序号不受影响
const BOUNDARY_PREFIX: &str = r"(?:^|[^A-Z0-9\-_]|[^A-Z0-9\-]_|sprd-|MZ-)";

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则表（保持表内顺序）
    pub fn compile_table(table: &RuleTable) -> DdResult<CompiledRuleTable> {
        let start = Instant::now();
        let mut stats = CompileStats::default();

        let mut rules = Vec::with_capacity(table.len());
        for (index, raw) in table.rules.iter().enumerate() {
            rules.push(Self::compile_rule(&table.id, index, raw, &mut stats)?);
        }

        // 回溯正则不进入预判集合，匹配时始终作为候选
        let (fancy_rules, prefilter_rules): (Vec<usize>, Vec<usize>) =
            (0..rules.len()).partition(|&i| rules[i].regex.is_fancy());
        let prefilter = Self::build_prefilter(&table.id, &rules, &prefilter_rules);

        debug!(
            "规则表 [{}] 编译完成，耗时{:?}，主规则{}条（回溯正则{}条）、版本子规则{}条、型号子规则{}条，预判集合：{}",
            table.id,
            start.elapsed(),
            stats.rule_count,
            fancy_rules.len(),
            stats.version_count,
            stats.model_count,
            if prefilter.is_some() { "启用" } else { "未启用" }
        );

        Ok(CompiledRuleTable {
            id: table.id.clone(),
            rules,
            prefilter,
            prefilter_rules,
            fancy_rules,
        })
    }

    /// 编译单个规则正则（大小写不敏感，附加边界前缀）
    /// regex 不支持的语法（环视、反向引用）改用 fancy-regex 编译，其余语法错误原样返回
    pub fn compile_pattern(raw_pattern: &str) -> DdResult<RulePattern> {
        let wrapped = Self::wrap_pattern(raw_pattern);
        match RegexBuilder::new(&wrapped).case_insensitive(true).build() {
            Ok(regex) => Ok(RulePattern::Standard(regex)),
            Err(regex::Error::Syntax(msg)) if msg.contains("not supported") => {
                let fancy = fancy_regex::Regex::new(&format!("(?i){}", wrapped)).map_err(|e| {
                    DeviceDetectorError::RuleParseError(format!("回溯正则编译失败：{}，错误：{}", raw_pattern, e))
                })?;
                debug!("正则 [{}] 使用回溯引擎编译", raw_pattern);
                Ok(RulePattern::Fancy(fancy))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn compile_rule(
        table_id: &str,
        index: usize,
        raw: &RawRule,
        stats: &mut CompileStats,
    ) -> DdResult<CompiledRule> {
        let regex = Self::compile_pattern(&raw.regex).map_err(|e| {
            DeviceDetectorError::RuleParseError(format!(
                "规则表 {} 第{}条规则正则无效：{}",
                table_id, index, e
            ))
        })?;
        let device = Self::parse_device(table_id, index, raw.device.as_deref())?;

        let versions = raw
            .versions
            .iter()
            .map(|sub| Self::compile_sub_rule(table_id, index, sub))
            .collect::<DdResult<Vec<_>>>()?;
        let models = raw
            .models
            .iter()
            .map(|sub| Self::compile_sub_rule(table_id, index, sub))
            .collect::<DdResult<Vec<_>>>()?;

        stats.rule_count += 1;
        stats.version_count += versions.len();
        stats.model_count += models.len();

        Ok(CompiledRule {
            regex,
            name: raw.name.clone(),
            version: raw.version.clone(),
            brand: raw.brand.clone(),
            model: raw.model.clone(),
            device,
            category: raw.category.clone(),
            url: raw.url.clone(),
            producer: raw.producer.clone(),
            versions,
            models,
        })
    }

    fn compile_sub_rule(table_id: &str, index: usize, raw: &RawSubRule) -> DdResult<CompiledSubRule> {
        let regex = Self::compile_pattern(&raw.regex).map_err(|e| {
            DeviceDetectorError::RuleParseError(format!(
                "规则表 {} 第{}条规则的子规则正则无效：{}",
                table_id, index, e
            ))
        })?;

        Ok(CompiledSubRule {
            regex,
            version: raw.version.clone(),
            model: raw.model.clone(),
            brand: raw.brand.clone(),
            device: Self::parse_device(table_id, index, raw.device.as_deref())?,
        })
    }

    /// 解析设备类型标签，未知标签视为规则表损坏
    fn parse_device(table_id: &str, index: usize, label: Option<&str>) -> DdResult<Option<DeviceType>> {
        label
            .map(|label| {
                label.parse::<DeviceType>().map_err(|_| {
                    DeviceDetectorError::RuleParseError(format!(
                        "规则表 {} 第{}条规则设备类型未知：{}",
                        table_id, index, label
                    ))
                })
            })
            .transpose()
    }

    /// 构建整表预判集合（仅包含标准正则规则）
    fn build_prefilter(table_id: &str, rules: &[CompiledRule], members: &[usize]) -> Option<RegexSet> {
        let patterns = members.iter().map(|&i| rules[i].regex.as_str());
        match RegexSetBuilder::new(patterns).case_insensitive(true).build() {
            Ok(set) => Some(set),
            Err(e) => {
                debug!("规则表 [{}] 预判集合构建失败，退化为逐条匹配：{}", table_id, e);
                None
            }
        }
    }

    fn wrap_pattern(raw_pattern: &str) -> String {
        // 移除PCRE分隔符
        let trimmed = raw_pattern.trim();
        let cleaned = if trimmed.len() >= 2 && trimmed.starts_with('/') && trimmed.ends_with('/') {
            &trimmed[1..trimmed.len() - 1]
        } else {
            trimmed
        };
        format!("{}(?:{})", BOUNDARY_PREFIX, cleaned)
    }
}

/// 编译统计信息
#[derive(Debug, Clone, Default)]
struct CompileStats {
    rule_count: usize,
    version_count: usize,
    model_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::CaptureGroups;

    #[test]
    fn compiled_patterns_are_case_insensitive_and_bounded() {
        let regex = RuleCompiler::compile_pattern("Chrome/(\\d+)").unwrap();
        assert!(!regex.is_fancy());
        let caps = regex.captures("Mozilla/5.0 CHROME/90.0").unwrap();
        assert_eq!(caps.group(1), Some("90"));
        // 标识符内部的子串不命中
        assert!(!regex.is_match("XChrome/90"));
        assert!(regex.is_match("Chrome/90"));
    }

    #[test]
    fn pcre_delimiters_are_stripped() {
        let regex = RuleCompiler::compile_pattern("/Googlebot/").unwrap();
        assert!(regex.is_match("compatible; Googlebot/2.1"));
    }

    #[test]
    fn invalid_regex_is_a_parse_error() {
        let table = RuleTable::new("oss", vec![RawRule::named("Linux(", "GNU/Linux")]);
        let err = RuleCompiler::compile_table(&table).unwrap_err();
        assert!(matches!(err, DeviceDetectorError::RuleParseError(_)));
    }

    #[test]
    fn unknown_device_label_is_a_parse_error() {
        let table = RuleTable::new(
            "device/mobiles",
            vec![RawRule {
                regex: "Nokia".to_string(),
                brand: Some("Nokia".to_string()),
                device: Some("phablet".to_string()),
                ..Default::default()
            }],
        );
        assert!(RuleCompiler::compile_table(&table).is_err());
    }

    #[test]
    fn prefilter_agrees_with_rule_order() {
        let table = RuleTable::new(
            "client/browsers",
            vec![
                RawRule::named("Edge/", "Microsoft Edge"),
                RawRule::named("Chrome/", "Chrome"),
                RawRule::named("Safari/", "Safari"),
            ],
        );
        let compiled = RuleCompiler::compile_table(&table).unwrap();
        assert!(compiled.prefilter.is_some());
        assert_eq!(compiled.first_candidate("Chrome/90 Safari/537"), Some(1));
        assert!(!compiled.may_match("curl/8.0"));
        assert_eq!(compiled.first_candidate("curl/8.0"), None);
    }

    #[test]
    fn look_around_falls_back_to_fancy_engine() {
        let regex = RuleCompiler::compile_pattern("Chrome(?!/\\d+ Edge)/(\\d+[\\.\\d]+)").unwrap();
        assert!(regex.is_fancy());
        let caps = regex.captures("Mozilla/5.0 chrome/90.0.4430").unwrap();
        assert_eq!(caps.group(1), Some("90.0.4430"));
        // 边界前缀对回溯引擎同样生效
        assert!(!regex.is_match("XChrome/90.0"));
        assert!(!regex.is_match("Chrome/90 Edge/18"));
    }

    #[test]
    fn look_around_rule_mid_table_keeps_rule_order() {
        let table = RuleTable::new(
            "client/browsers",
            vec![
                RawRule::named("Edge/", "Microsoft Edge"),
                RawRule::named("Chrome(?!/\\d+ OPR)/(\\d+)", "Chrome").with_version("$1"),
                RawRule::named("Chrome/", "Chromium"),
                RawRule::named("Safari/", "Safari"),
            ],
        );
        let compiled = RuleCompiler::compile_table(&table).unwrap();
        assert!(compiled.prefilter.is_some());
        assert_eq!(compiled.fancy_rules, vec![1]);
        assert_eq!(compiled.prefilter_rules, vec![0, 2, 3]);

        // 回溯规则始终作为候选，起点不会越过它
        assert_eq!(compiled.first_candidate("Chrome/90 Safari/537"), Some(1));
        assert_eq!(compiled.first_candidate("Edge/18 Chrome/90"), Some(0));
        assert_eq!(compiled.first_candidate("curl/8.0"), Some(1));
        assert!(compiled.may_match("curl/8.0"));
    }

    #[test]
    fn ordinary_syntax_errors_are_not_retried() {
        assert!(matches!(
            RuleCompiler::compile_pattern("Linux("),
            Err(DeviceDetectorError::RegexCompileError(_))
        ));
    }
}
