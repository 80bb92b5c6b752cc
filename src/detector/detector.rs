//! 检测器核心：按固定阶段串联各解析器，输出识别结果
//! 阶段顺序：爬虫 -> 操作系统 -> 客户端链 -> 设备链 -> 设备类型启发式

use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::heuristics;
use super::registry::ClientTypeRegistry;
use super::result::DetectResult;
use crate::config::{DetectorOptions, GlobalConfig};
use crate::error::DdResult;
use crate::parser::{BotParser, CategoryParser, ClientParserChain, DeviceParserChain, OsParser};
use crate::rule::model::RuleLibrary;
use crate::rule::record::{BotRecord, ClientRecord, DeviceRecord, OsRecord};
use crate::rule::RuleLoader;

/// UA 识别器
///
/// 构造完成后只读，可在多线程间共享；编译结果存放在 [`DetectorOptions::cache`] 中。
#[derive(Debug)]
pub struct DeviceDetector {
    bot_parser: BotParser,
    os_parser: OsParser,
    client_chain: ClientParserChain,
    device_chain: DeviceParserChain,
    client_types: ClientTypeRegistry,
    options: DetectorOptions,
}

impl DeviceDetector {
    /// 加载规则库并创建检测器
    pub async fn new(config: &GlobalConfig, options: DetectorOptions) -> DdResult<Self> {
        let rule_lib = RuleLoader::load(config).await?;
        Self::with_rules(&rule_lib, options)
    }

    /// 基于已加载的规则库创建检测器，所有规则表在此处完成编译校验
    pub fn with_rules(rule_lib: &RuleLibrary, options: DetectorOptions) -> DdResult<Self> {
        let start = Instant::now();
        let cache = options.cache.clone();

        let bot_parser = BotParser::new(Arc::new(rule_lib.bots.clone()), cache.clone())
            .discard_details(options.discard_bot_details);
        let os_parser = OsParser::new(Arc::new(rule_lib.oss.clone()), cache.clone());
        let client_chain = ClientParserChain::from_kinds(&options.client_chain(), rule_lib, cache.clone());
        let device_chain = DeviceParserChain::from_kinds(&options.device_chain(), rule_lib, cache);

        bot_parser.warm()?;
        os_parser.warm()?;
        client_chain.warm()?;
        device_chain.warm()?;

        let client_types = ClientTypeRegistry::from_chain(&client_chain);

        debug!(
            "检测器初始化完成，耗时 {:?}，规则总数：{}，客户端链：{:?}，设备链：{:?}",
            start.elapsed(),
            rule_lib.rule_count(),
            client_chain.parser_names(),
            device_chain.parser_names()
        );

        Ok(Self {
            bot_parser,
            os_parser,
            client_chain,
            device_chain,
            client_types,
            options,
        })
    }

    /// 识别单条 UA
    pub fn detect(&self, user_agent: &str) -> DetectResult {
        // 1. 爬虫命中直接返回，不再执行其余阶段
        if let Some(bot) = self.parse_bot(user_agent) {
            return DetectResult::bot(user_agent, bot);
        }

        let mut result = DetectResult::unresolved(user_agent);

        // 2. 操作系统
        result.os = self.parse_os(user_agent);

        // 3. 客户端链
        if let Some(client) = self.parse_client(user_agent) {
            result.client = client;
        }

        // 4. 设备链
        if let Some(device) = self.parse_device(user_agent) {
            result.device = device;
        }

        // 5. 设备类型仍未知时应用启发式规则
        if result.device.device_type.is_none() {
            result.device.device_type = heuristics::infer_device_type(&result.os, user_agent);
        }

        result.resolve_families();
        result
    }

    /// 爬虫阶段；开启 skip_bot_detection 时始终返回 None
    pub fn parse_bot(&self, user_agent: &str) -> Option<BotRecord> {
        if self.options.skip_bot_detection {
            return None;
        }
        self.bot_parser.parse(user_agent)
    }

    pub fn parse_os(&self, user_agent: &str) -> OsRecord {
        self.os_parser.parse_or_default(user_agent)
    }

    pub fn parse_client(&self, user_agent: &str) -> Option<ClientRecord> {
        self.client_chain.parse(user_agent)
    }

    pub fn parse_device(&self, user_agent: &str) -> Option<DeviceRecord> {
        self.device_chain.parse(user_agent)
    }

    /// 当前客户端链可识别的客户端类型
    pub fn client_types(&self) -> &ClientTypeRegistry {
        &self.client_types
    }

    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }
}
