//! 爬虫解析器
//! 每次识别最先执行；命中后检测器跳过其余所有阶段

use std::sync::Arc;

use super::matcher::first_match;
use super::CategoryParser;
use crate::compiler::{CachedTable, PatternCache};
use crate::error::DdResult;
use crate::rule::model::RuleTable;
use crate::rule::record::{or_unknown, BotRecord};

/// 爬虫解析器
#[derive(Debug, Clone)]
pub struct BotParser {
    table: CachedTable,
    discard_details: bool,
}

impl BotParser {
    pub fn new(table: Arc<RuleTable>, cache: Arc<dyn PatternCache>) -> Self {
        Self {
            table: CachedTable::new(table, cache),
            discard_details: false,
        }
    }

    /// 精简模式：命中时只返回“是爬虫”标记，不填充名称/分类等字段
    pub fn discard_details(mut self, discard: bool) -> Self {
        self.discard_details = discard;
        self
    }
}

impl CategoryParser for BotParser {
    type Output = BotRecord;

    fn name(&self) -> &'static str {
        "bot"
    }

    fn parse(&self, user_agent: &str) -> Option<BotRecord> {
        let compiled = self.table.compiled();
        let matched = first_match(&compiled, user_agent)?;

        if self.discard_details {
            return Some(BotRecord::presence_only());
        }

        let rule = matched.rule;
        let producer = rule.producer.clone().unwrap_or_default();
        Some(BotRecord {
            name: or_unknown(matched.expand(rule.name.as_deref())),
            category: or_unknown(rule.category.clone().unwrap_or_default()),
            url: or_unknown(rule.url.clone().unwrap_or_default()),
            producer_name: or_unknown(producer.name.unwrap_or_default()),
            producer_url: or_unknown(producer.url.unwrap_or_default()),
        })
    }

    fn warm(&self) -> DdResult<()> {
        self.table.warm().map(|_| ())
    }
}
