//! 全局配置管理,存储所有可配置项

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::compiler::{default_pattern_cache, PatternCache};
use crate::parser::{ClientParserKind, DeviceParserKind};

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 规则表目录
    pub rules_dir: PathBuf,
    // 规则快照路径
    pub rule_cache_path: PathBuf,
    // 是否读写规则快照
    pub use_rule_cache: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            rules_dir: PathBuf::from("regexes"),
            rule_cache_path: PathBuf::from("device_detector_rules.mp"),
            use_rule_cache: true,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules_dir(mut self, path: PathBuf) -> Self {
        self.config.rules_dir = path;
        self
    }

    pub fn rule_cache_path(mut self, path: PathBuf) -> Self {
        self.config.rule_cache_path = path;
        self
    }

    pub fn use_rule_cache(mut self, enabled: bool) -> Self {
        self.config.use_rule_cache = enabled;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

/// 检测选项
/// - discard_bot_details：命中爬虫时仅保留“是爬虫”标记
/// - skip_bot_detection：完全跳过爬虫阶段
/// - cache：编译缓存（未指定时使用进程级内存缓存）
/// - client_parsers / device_parsers：解析链顺序覆盖
#[derive(Clone)]
pub struct DetectorOptions {
    pub discard_bot_details: bool,
    pub skip_bot_detection: bool,
    pub cache: Arc<dyn PatternCache>,
    pub client_parsers: Option<Vec<ClientParserKind>>,
    pub device_parsers: Option<Vec<DeviceParserKind>>,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            discard_bot_details: false,
            skip_bot_detection: false,
            cache: default_pattern_cache(),
            client_parsers: None,
            device_parsers: None,
        }
    }
}

impl fmt::Debug for DetectorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectorOptions")
            .field("discard_bot_details", &self.discard_bot_details)
            .field("skip_bot_detection", &self.skip_bot_detection)
            .field("client_parsers", &self.client_parsers)
            .field("device_parsers", &self.device_parsers)
            .finish_non_exhaustive()
    }
}

impl DetectorOptions {
    pub fn with_discard_bot_details(mut self, discard: bool) -> Self {
        self.discard_bot_details = discard;
        self
    }

    pub fn with_skip_bot_detection(mut self, skip: bool) -> Self {
        self.skip_bot_detection = skip;
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn PatternCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_client_parsers(mut self, parsers: Vec<ClientParserKind>) -> Self {
        self.client_parsers = Some(parsers);
        self
    }

    pub fn with_device_parsers(mut self, parsers: Vec<DeviceParserKind>) -> Self {
        self.device_parsers = Some(parsers);
        self
    }

    /// 实际生效的客户端解析链顺序
    pub fn client_chain(&self) -> Vec<ClientParserKind> {
        self.client_parsers
            .clone()
            .unwrap_or_else(|| ClientParserKind::DEFAULT_ORDER.to_vec())
    }

    /// 实际生效的设备解析链顺序
    pub fn device_chain(&self) -> Vec<DeviceParserKind> {
        self.device_parsers
            .clone()
            .unwrap_or_else(|| DeviceParserKind::DEFAULT_ORDER.to_vec())
    }
}
