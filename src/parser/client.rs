//! 客户端解析器与解析链
//! 解析链顺序由配置决定且影响结果：同时命中多个分类时，以链中靠前的解析器为准

use std::sync::Arc;
use serde::{Deserialize, Serialize};

use super::matcher::first_match;
use super::CategoryParser;
use crate::compiler::{CachedTable, PatternCache};
use crate::error::DdResult;
use crate::family::FamilyResolver;
use crate::rule::model::{RuleLibrary, RuleTable};
use crate::rule::record::{or_unknown, ClientRecord, ClientType, UNKNOWN};

/// 客户端分类解析器：在统一接口之上额外声明所产出的客户端类型
pub trait ClientCategoryParser: CategoryParser<Output = ClientRecord> {
    fn client_type(&self) -> ClientType;
}

/// 客户端解析器种类（用于配置解析链顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientParserKind {
    FeedReader,
    MobileApp,
    MediaPlayer,
    Pim,
    Browser,
}

impl ClientParserKind {
    /// 默认解析链顺序
    pub const DEFAULT_ORDER: [ClientParserKind; 5] = [
        ClientParserKind::FeedReader,
        ClientParserKind::MobileApp,
        ClientParserKind::MediaPlayer,
        ClientParserKind::Pim,
        ClientParserKind::Browser,
    ];

    fn table(self, lib: &RuleLibrary) -> &RuleTable {
        match self {
            ClientParserKind::FeedReader => &lib.feed_readers,
            ClientParserKind::MobileApp => &lib.mobile_apps,
            ClientParserKind::MediaPlayer => &lib.media_players,
            ClientParserKind::Pim => &lib.pim,
            ClientParserKind::Browser => &lib.browsers,
        }
    }

    /// 按种类构建解析器
    pub fn build(self, lib: &RuleLibrary, cache: Arc<dyn PatternCache>) -> Box<dyn ClientCategoryParser> {
        let table = Arc::new(self.table(lib).clone());
        match self {
            ClientParserKind::FeedReader => Box::new(FeedReaderParser::new(table, cache)),
            ClientParserKind::MobileApp => Box::new(MobileAppParser::new(table, cache)),
            ClientParserKind::MediaPlayer => Box::new(MediaPlayerParser::new(table, cache)),
            ClientParserKind::Pim => Box::new(PimParser::new(table, cache)),
            ClientParserKind::Browser => Box::new(BrowserParser::new(table, cache)),
        }
    }
}

/// 通用客户端提取：名称 + 版本，短代码由调用方决定
fn parse_client(table: &CachedTable, client_type: ClientType, user_agent: &str) -> Option<ClientRecord> {
    let compiled = table.compiled();
    let matched = first_match(&compiled, user_agent)?;

    Some(ClientRecord {
        client_type: Some(client_type),
        name: or_unknown(matched.expand(matched.rule.name.as_deref())),
        short_name: UNKNOWN.to_string(),
        version: or_unknown(matched.version(user_agent)),
    })
}

/// 订阅阅读器解析器
#[derive(Debug, Clone)]
pub struct FeedReaderParser {
    table: CachedTable,
}

impl FeedReaderParser {
    pub fn new(table: Arc<RuleTable>, cache: Arc<dyn PatternCache>) -> Self {
        Self { table: CachedTable::new(table, cache) }
    }
}

impl CategoryParser for FeedReaderParser {
    type Output = ClientRecord;

    fn name(&self) -> &'static str {
        "feed_reader"
    }

    fn parse(&self, user_agent: &str) -> Option<ClientRecord> {
        parse_client(&self.table, ClientType::FeedReader, user_agent)
    }

    fn warm(&self) -> DdResult<()> {
        self.table.warm().map(|_| ())
    }
}

impl ClientCategoryParser for FeedReaderParser {
    fn client_type(&self) -> ClientType {
        ClientType::FeedReader
    }
}

/// 移动应用解析器
#[derive(Debug, Clone)]
pub struct MobileAppParser {
    table: CachedTable,
}

impl MobileAppParser {
    pub fn new(table: Arc<RuleTable>, cache: Arc<dyn PatternCache>) -> Self {
        Self { table: CachedTable::new(table, cache) }
    }
}

impl CategoryParser for MobileAppParser {
    type Output = ClientRecord;

    fn name(&self) -> &'static str {
        "mobile_app"
    }

    fn parse(&self, user_agent: &str) -> Option<ClientRecord> {
        parse_client(&self.table, ClientType::MobileApp, user_agent)
    }

    fn warm(&self) -> DdResult<()> {
        self.table.warm().map(|_| ())
    }
}

impl ClientCategoryParser for MobileAppParser {
    fn client_type(&self) -> ClientType {
        ClientType::MobileApp
    }
}

/// 媒体播放器解析器
#[derive(Debug, Clone)]
pub struct MediaPlayerParser {
    table: CachedTable,
}

impl MediaPlayerParser {
    pub fn new(table: Arc<RuleTable>, cache: Arc<dyn PatternCache>) -> Self {
        Self { table: CachedTable::new(table, cache) }
    }
}

impl CategoryParser for MediaPlayerParser {
    type Output = ClientRecord;

    fn name(&self) -> &'static str {
        "media_player"
    }

    fn parse(&self, user_agent: &str) -> Option<ClientRecord> {
        parse_client(&self.table, ClientType::MediaPlayer, user_agent)
    }

    fn warm(&self) -> DdResult<()> {
        self.table.warm().map(|_| ())
    }
}

impl ClientCategoryParser for MediaPlayerParser {
    fn client_type(&self) -> ClientType {
        ClientType::MediaPlayer
    }
}

/// 个人信息管理（邮件/日历客户端）解析器
#[derive(Debug, Clone)]
pub struct PimParser {
    table: CachedTable,
}

impl PimParser {
    pub fn new(table: Arc<RuleTable>, cache: Arc<dyn PatternCache>) -> Self {
        Self { table: CachedTable::new(table, cache) }
    }
}

impl CategoryParser for PimParser {
    type Output = ClientRecord;

    fn name(&self) -> &'static str {
        "pim"
    }

    fn parse(&self, user_agent: &str) -> Option<ClientRecord> {
        parse_client(&self.table, ClientType::Pim, user_agent)
    }

    fn warm(&self) -> DdResult<()> {
        self.table.warm().map(|_| ())
    }
}

impl ClientCategoryParser for PimParser {
    fn client_type(&self) -> ClientType {
        ClientType::Pim
    }
}

/// 浏览器解析器：在通用提取之上解析浏览器短代码
#[derive(Debug, Clone)]
pub struct BrowserParser {
    table: CachedTable,
}

impl BrowserParser {
    pub fn new(table: Arc<RuleTable>, cache: Arc<dyn PatternCache>) -> Self {
        Self { table: CachedTable::new(table, cache) }
    }
}

impl CategoryParser for BrowserParser {
    type Output = ClientRecord;

    fn name(&self) -> &'static str {
        "browser"
    }

    fn parse(&self, user_agent: &str) -> Option<ClientRecord> {
        let mut record = parse_client(&self.table, ClientType::Browser, user_agent)?;
        if let Some(code) = FamilyResolver::browser_short_code(&record.name) {
            record.short_name = code.to_string();
        }
        Some(record)
    }

    fn warm(&self) -> DdResult<()> {
        self.table.warm().map(|_| ())
    }
}

impl ClientCategoryParser for BrowserParser {
    fn client_type(&self) -> ClientType {
        ClientType::Browser
    }
}

/// 客户端解析链：按顺序尝试，返回第一个非空结果
#[derive(Default)]
pub struct ClientParserChain {
    parsers: Vec<Box<dyn ClientCategoryParser>>,
}

impl ClientParserChain {
    pub fn new(parsers: Vec<Box<dyn ClientCategoryParser>>) -> Self {
        Self { parsers }
    }

    /// 按种类顺序从规则库构建
    pub fn from_kinds(kinds: &[ClientParserKind], lib: &RuleLibrary, cache: Arc<dyn PatternCache>) -> Self {
        Self::new(kinds.iter().map(|kind| kind.build(lib, cache.clone())).collect())
    }

    pub fn parse(&self, user_agent: &str) -> Option<ClientRecord> {
        self.parsers.iter().find_map(|parser| parser.parse(user_agent))
    }

    pub fn warm(&self) -> DdResult<()> {
        self.parsers.iter().try_for_each(|parser| parser.warm())
    }

    pub fn parser_names(&self) -> Vec<&'static str> {
        self.parsers.iter().map(|parser| parser.name()).collect()
    }

    /// 链中各解析器产出的客户端类型（按链顺序）
    pub fn client_types(&self) -> impl Iterator<Item = ClientType> + '_ {
        self.parsers.iter().map(|parser| parser.client_type())
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl std::fmt::Debug for ClientParserChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientParserChain")
            .field("parsers", &self.parser_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::MemoryPatternCache;
    use crate::rule::model::RawRule;

    fn library() -> RuleLibrary {
        let mut lib = RuleLibrary::default();
        lib.media_players.rules.push(RawRule::named("VLC(?:/([\\d\\.]+))?", "VLC").with_version("$1"));
        lib.browsers.rules.push(RawRule::named("VLC/([\\d\\.]+)", "Firefox").with_version("$1"));
        lib.browsers.rules.push(RawRule::named("Chrome/(\\d+[\\.\\d]+)", "Chrome").with_version("$1"));
        lib
    }

    fn cache() -> Arc<dyn PatternCache> {
        Arc::new(MemoryPatternCache::new())
    }

    #[test]
    fn earlier_chain_member_wins() {
        let lib = library();
        let chain = ClientParserChain::from_kinds(&ClientParserKind::DEFAULT_ORDER, &lib, cache());
        let client = chain.parse("VLC/3.0.18 LibVLC/3.0.18").unwrap();
        assert_eq!(client.client_type, Some(ClientType::MediaPlayer));
        assert_eq!(client.name, "VLC");
        assert_eq!(client.version, "3.0.18");
        assert_eq!(client.short_name, UNKNOWN);

        // 调整顺序后浏览器优先
        let chain = ClientParserChain::from_kinds(
            &[ClientParserKind::Browser, ClientParserKind::MediaPlayer],
            &lib,
            cache(),
        );
        let client = chain.parse("VLC/3.0.18 LibVLC/3.0.18").unwrap();
        assert_eq!(client.client_type, Some(ClientType::Browser));
    }

    #[test]
    fn browser_gets_short_code() {
        let lib = library();
        let chain = ClientParserChain::from_kinds(&ClientParserKind::DEFAULT_ORDER, &lib, cache());
        let client = chain.parse("Mozilla/5.0 (Windows NT 10.0) Chrome/90.0.4430.93").unwrap();
        assert_eq!(client.name, "Chrome");
        assert_eq!(client.short_name, "CH");
        assert_eq!(client.version, "90.0.4430.93");
    }

    #[test]
    fn all_parsers_missing_yields_none() {
        let lib = library();
        let chain = ClientParserChain::from_kinds(&ClientParserKind::DEFAULT_ORDER, &lib, cache());
        assert!(chain.parse("curl/8.1.2").is_none());
        assert!(ClientParserChain::default().parse("Chrome/90.0").is_none());
    }

    #[test]
    fn chain_reports_types_in_order() {
        let chain = ClientParserChain::from_kinds(
            &[ClientParserKind::Pim, ClientParserKind::FeedReader],
            &RuleLibrary::default(),
            cache(),
        );
        let types: Vec<_> = chain.client_types().collect();
        assert_eq!(types, vec![ClientType::Pim, ClientType::FeedReader]);
        assert_eq!(chain.parser_names(), vec!["pim", "feed_reader"]);
    }
}
