//! 编译后模式模型
//! 正则编译后的结构，规则表顺序原样保留

use regex::{Regex, RegexSet};
use tracing::debug;

use crate::rule::model::BotProducer;
use crate::rule::record::DeviceType;
use crate::utils::CaptureGroups;

/// 规则正则
/// 默认使用 regex；含环视/反向引用等 regex 不支持的语法时改用 fancy-regex
#[derive(Debug, Clone)]
pub enum RulePattern {
    Standard(Regex),
    Fancy(fancy_regex::Regex),
}

impl RulePattern {
    pub fn is_fancy(&self) -> bool {
        matches!(self, RulePattern::Fancy(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            RulePattern::Standard(regex) => regex.as_str(),
            RulePattern::Fancy(regex) => regex.as_str(),
        }
    }

    pub fn is_match(&self, input: &str) -> bool {
        match self {
            RulePattern::Standard(regex) => regex.is_match(input),
            RulePattern::Fancy(regex) => regex.is_match(input).unwrap_or_else(|e| {
                debug!("回溯正则执行失败，按未命中处理：{}", e);
                false
            }),
        }
    }

    pub fn captures<'u>(&self, input: &'u str) -> Option<RuleCaptures<'u>> {
        match self {
            RulePattern::Standard(regex) => regex.captures(input).map(RuleCaptures::Standard),
            RulePattern::Fancy(regex) => match regex.captures(input) {
                Ok(captures) => captures.map(RuleCaptures::Fancy),
                Err(e) => {
                    debug!("回溯正则执行失败，按未命中处理：{}", e);
                    None
                }
            },
        }
    }
}

/// 规则命中的捕获结果（两种正则引擎统一视图）
#[derive(Debug)]
pub enum RuleCaptures<'u> {
    Standard(regex::Captures<'u>),
    Fancy(fancy_regex::Captures<'u>),
}

impl CaptureGroups for RuleCaptures<'_> {
    fn group(&self, index: usize) -> Option<&str> {
        match self {
            RuleCaptures::Standard(captures) => captures.group(index),
            RuleCaptures::Fancy(captures) => captures.group(index),
        }
    }

    fn group_count(&self) -> usize {
        match self {
            RuleCaptures::Standard(captures) => captures.group_count(),
            RuleCaptures::Fancy(captures) => captures.group_count(),
        }
    }
}

/// 编译后的嵌套子规则
#[derive(Debug, Clone)]
pub struct CompiledSubRule {
    pub regex: RulePattern,
    pub version: Option<String>,
    pub model: Option<String>,
    pub brand: Option<String>,
    pub device: Option<DeviceType>,
}

/// 编译后的单条规则
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub regex: RulePattern,
    pub name: Option<String>,
    pub version: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub device: Option<DeviceType>,
    pub category: Option<String>,
    pub url: Option<String>,
    pub producer: Option<BotProducer>,
    pub versions: Vec<CompiledSubRule>,
    pub models: Vec<CompiledSubRule>,
}

/// 编译后的规则表
#[derive(Debug, Clone)]
pub struct CompiledRuleTable {
    pub id: String,
    pub rules: Vec<CompiledRule>,
    /// 标准正则规则的集合，用于整表快速预判；构建失败时为 None，退化为逐条扫描
    pub prefilter: Option<RegexSet>,
    /// 预判集合第 i 个模式对应的规则下标
    pub prefilter_rules: Vec<usize>,
    /// 不在预判集合中的回溯正则规则下标（升序），始终视为候选
    pub fancy_rules: Vec<usize>,
}

impl CompiledRuleTable {
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rules: Vec::new(),
            prefilter: None,
            prefilter_rules: Vec::new(),
            fancy_rules: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 预判输入是否可能命中本表任意规则
    /// 返回 false 时逐条扫描同样不会命中
    #[inline]
    pub fn may_match(&self, input: &str) -> bool {
        self.first_candidate(input).is_some()
    }

    /// 按表顺序返回第一条可能命中的规则下标
    /// 该下标之前的规则必然不命中
    #[inline]
    pub fn first_candidate(&self, input: &str) -> Option<usize> {
        let Some(set) = &self.prefilter else {
            return (!self.rules.is_empty()).then_some(0);
        };
        let from_set = set
            .matches(input)
            .iter()
            .next()
            .and_then(|i| self.prefilter_rules.get(i).copied());
        [from_set, self.fancy_rules.first().copied()]
            .into_iter()
            .flatten()
            .min()
    }
}
