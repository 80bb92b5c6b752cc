//! 规则数据模型定义
//! 仅存储规则数据，无任何业务逻辑，支持序列化/反序列化

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use serde::{Deserialize, Serialize};

/// 爬虫规则的生产者信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct BotProducer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// 嵌套子规则（版本细化 / 型号提取），作用域限定在父规则命中之后
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct RawSubRule {
    pub regex: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
}

/// 单条匹配规则（所有分类共用同一结构，不同分类读取不同字段）
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct RawRule {
    pub regex: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,

    // 设备表字段
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub device: Option<String>,

    // 爬虫表字段
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub producer: Option<BotProducer>,

    // 嵌套子规则
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<RawSubRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<RawSubRule>,
}

impl RawRule {
    /// 仅含正则与名称模板的快捷构造
    pub fn named(regex: &str, name: &str) -> Self {
        Self {
            regex: regex.to_string(),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }
}

/// 规则表：有序规则序列，顺序即优先级
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleTable {
    /// 规则表标识（如 `oss`、`client/browsers`）
    #[serde(default)]
    pub id: String,
    pub rules: Vec<RawRule>,
}

impl RuleTable {
    pub fn new(id: impl Into<String>, rules: Vec<RawRule>) -> Self {
        Self { id: id.into(), rules }
    }

    pub fn empty(id: impl Into<String>) -> Self {
        Self::new(id, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 编译缓存键：表标识 + 规则内容指纹
    /// 同名但内容不同的规则表不会在共享缓存中互相覆盖
    pub fn cache_key(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.rules.hash(&mut hasher);
        format!("{}#{:016x}", self.id, hasher.finish())
    }
}

/// 规则表标识常量，同时对应规则目录下的相对文件路径（不含扩展名）
pub mod table_id {
    pub const BOTS: &str = "bots";
    pub const OSS: &str = "oss";
    pub const FEED_READERS: &str = "client/feed_readers";
    pub const MOBILE_APPS: &str = "client/mobile_apps";
    pub const MEDIA_PLAYERS: &str = "client/mediaplayers";
    pub const PIM: &str = "client/pim";
    pub const BROWSERS: &str = "client/browsers";
    pub const TELEVISIONS: &str = "device/televisions";
    pub const CONSOLES: &str = "device/consoles";
    pub const MOBILES: &str = "device/mobiles";

    /// 全部规则表（加载顺序）
    pub const ALL: [&str; 10] = [
        BOTS, OSS, FEED_READERS, MOBILE_APPS, MEDIA_PLAYERS, PIM, BROWSERS, TELEVISIONS, CONSOLES, MOBILES,
    ];
}

/// 完整规则库
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleLibrary {
    #[serde(default = "default_bots")]
    pub bots: RuleTable,
    #[serde(default = "default_oss")]
    pub oss: RuleTable,
    #[serde(default = "default_feed_readers")]
    pub feed_readers: RuleTable,
    #[serde(default = "default_mobile_apps")]
    pub mobile_apps: RuleTable,
    #[serde(default = "default_media_players")]
    pub media_players: RuleTable,
    #[serde(default = "default_pim")]
    pub pim: RuleTable,
    #[serde(default = "default_browsers")]
    pub browsers: RuleTable,
    #[serde(default = "default_televisions")]
    pub televisions: RuleTable,
    #[serde(default = "default_consoles")]
    pub consoles: RuleTable,
    #[serde(default = "default_mobiles")]
    pub mobiles: RuleTable,
}

fn default_bots() -> RuleTable { RuleTable::empty(table_id::BOTS) }
fn default_oss() -> RuleTable { RuleTable::empty(table_id::OSS) }
fn default_feed_readers() -> RuleTable { RuleTable::empty(table_id::FEED_READERS) }
fn default_mobile_apps() -> RuleTable { RuleTable::empty(table_id::MOBILE_APPS) }
fn default_media_players() -> RuleTable { RuleTable::empty(table_id::MEDIA_PLAYERS) }
fn default_pim() -> RuleTable { RuleTable::empty(table_id::PIM) }
fn default_browsers() -> RuleTable { RuleTable::empty(table_id::BROWSERS) }
fn default_televisions() -> RuleTable { RuleTable::empty(table_id::TELEVISIONS) }
fn default_consoles() -> RuleTable { RuleTable::empty(table_id::CONSOLES) }
fn default_mobiles() -> RuleTable { RuleTable::empty(table_id::MOBILES) }

impl Default for RuleLibrary {
    fn default() -> Self {
        Self {
            bots: default_bots(),
            oss: default_oss(),
            feed_readers: default_feed_readers(),
            mobile_apps: default_mobile_apps(),
            media_players: default_media_players(),
            pim: default_pim(),
            browsers: default_browsers(),
            televisions: default_televisions(),
            consoles: default_consoles(),
            mobiles: default_mobiles(),
        }
    }
}

impl RuleLibrary {
    /// 按固定顺序遍历所有规则表
    pub fn tables(&self) -> [&RuleTable; 10] {
        [
            &self.bots,
            &self.oss,
            &self.feed_readers,
            &self.mobile_apps,
            &self.media_players,
            &self.pim,
            &self.browsers,
            &self.televisions,
            &self.consoles,
            &self.mobiles,
        ]
    }

    /// 按标识获取可写规则表（加载器按文件路径回填）
    pub fn table_mut(&mut self, id: &str) -> Option<&mut RuleTable> {
        let table = match id {
            table_id::BOTS => &mut self.bots,
            table_id::OSS => &mut self.oss,
            table_id::FEED_READERS => &mut self.feed_readers,
            table_id::MOBILE_APPS => &mut self.mobile_apps,
            table_id::MEDIA_PLAYERS => &mut self.media_players,
            table_id::PIM => &mut self.pim,
            table_id::BROWSERS => &mut self.browsers,
            table_id::TELEVISIONS => &mut self.televisions,
            table_id::CONSOLES => &mut self.consoles,
            table_id::MOBILES => &mut self.mobiles,
            _ => return None,
        };
        Some(table)
    }

    /// 按字段位置重置规则表标识，避免外部文档中的标识与所在位置不一致
    pub fn normalize_ids(&mut self) {
        for id in table_id::ALL {
            if let Some(table) = self.table_mut(id) {
                table.id = id.to_string();
            }
        }
    }

    /// 规则总数
    pub fn rule_count(&self) -> usize {
        self.tables().iter().map(|t| t.len()).sum()
    }
}
