//! 设备解析器与解析链
//! 每个设备解析器在执行完整规则表前先做整表预判，预判不命中则直接跳过

use std::sync::Arc;
use serde::{Deserialize, Serialize};

use super::matcher::{first_match, first_sub_match};
use super::CategoryParser;
use crate::compiler::{CachedTable, PatternCache};
use crate::error::DdResult;
use crate::rule::model::{RuleLibrary, RuleTable};
use crate::rule::record::{or_unknown, DeviceRecord, DeviceType};
use crate::utils::TemplateExpander;

/// 设备分类解析器：在统一接口之上增加廉价预判
pub trait DeviceCategoryParser: CategoryParser<Output = DeviceRecord> {
    /// 输入是否可能属于本分类；仅用于提前跳过，不改变结果
    fn pre_check(&self, user_agent: &str) -> bool;
}

/// 设备解析器种类（用于配置解析链顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceParserKind {
    Television,
    Console,
    Mobile,
}

impl DeviceParserKind {
    /// 默认解析链顺序
    pub const DEFAULT_ORDER: [DeviceParserKind; 3] = [
        DeviceParserKind::Television,
        DeviceParserKind::Console,
        DeviceParserKind::Mobile,
    ];

    fn table(self, lib: &RuleLibrary) -> &RuleTable {
        match self {
            DeviceParserKind::Television => &lib.televisions,
            DeviceParserKind::Console => &lib.consoles,
            DeviceParserKind::Mobile => &lib.mobiles,
        }
    }

    /// 按种类构建解析器
    pub fn build(self, lib: &RuleLibrary, cache: Arc<dyn PatternCache>) -> Box<dyn DeviceCategoryParser> {
        let table = Arc::new(self.table(lib).clone());
        match self {
            DeviceParserKind::Television => Box::new(TelevisionParser::new(table, cache)),
            DeviceParserKind::Console => Box::new(ConsoleParser::new(table, cache)),
            DeviceParserKind::Mobile => Box::new(MobileParser::new(table, cache)),
        }
    }
}

/// 通用设备提取
///
/// 型号子规则按顺序评估，第一条命中者提供型号，并可覆盖品牌与设备类型；
/// 无子规则命中时使用主规则的型号模板。设备类型优先级：子规则 > 主规则 > 解析器默认值。
fn parse_device(
    table: &CachedTable,
    default_type: Option<DeviceType>,
    user_agent: &str,
) -> Option<DeviceRecord> {
    let compiled = table.compiled();
    let matched = first_match(&compiled, user_agent)?;
    let rule = matched.rule;

    let mut brand = matched.expand(rule.brand.as_deref());
    let mut device_type = rule.device.or(default_type);
    let model = match first_sub_match(&rule.models, user_agent) {
        Some((sub, captures)) => {
            if let Some(sub_brand) = sub.brand.as_deref() {
                brand = TemplateExpander::expand(sub_brand, &captures);
            }
            if sub.device.is_some() {
                device_type = sub.device;
            }
            sub.model
                .as_deref()
                .map(|t| TemplateExpander::expand_model(t, &captures))
                .unwrap_or_default()
        }
        None => rule
            .model
            .as_deref()
            .map(|t| TemplateExpander::expand_model(t, &matched.captures))
            .unwrap_or_default(),
    };

    Some(DeviceRecord {
        device_type,
        brand: or_unknown(brand),
        model: or_unknown(model),
    })
}

/// 电视 / 机顶盒解析器
#[derive(Debug, Clone)]
pub struct TelevisionParser {
    table: CachedTable,
}

impl TelevisionParser {
    pub fn new(table: Arc<RuleTable>, cache: Arc<dyn PatternCache>) -> Self {
        Self { table: CachedTable::new(table, cache) }
    }
}

impl CategoryParser for TelevisionParser {
    type Output = DeviceRecord;

    fn name(&self) -> &'static str {
        "television"
    }

    fn parse(&self, user_agent: &str) -> Option<DeviceRecord> {
        parse_device(&self.table, Some(DeviceType::Tv), user_agent)
    }

    fn warm(&self) -> DdResult<()> {
        self.table.warm().map(|_| ())
    }
}

impl DeviceCategoryParser for TelevisionParser {
    fn pre_check(&self, user_agent: &str) -> bool {
        self.table.compiled().may_match(user_agent)
    }
}

/// 游戏主机解析器
#[derive(Debug, Clone)]
pub struct ConsoleParser {
    table: CachedTable,
}

impl ConsoleParser {
    pub fn new(table: Arc<RuleTable>, cache: Arc<dyn PatternCache>) -> Self {
        Self { table: CachedTable::new(table, cache) }
    }
}

impl CategoryParser for ConsoleParser {
    type Output = DeviceRecord;

    fn name(&self) -> &'static str {
        "console"
    }

    fn parse(&self, user_agent: &str) -> Option<DeviceRecord> {
        parse_device(&self.table, Some(DeviceType::Console), user_agent)
    }

    fn warm(&self) -> DdResult<()> {
        self.table.warm().map(|_| ())
    }
}

impl DeviceCategoryParser for ConsoleParser {
    fn pre_check(&self, user_agent: &str) -> bool {
        self.table.compiled().may_match(user_agent)
    }
}

/// 通用移动设备（手机 / 平板等）解析器，设备类型完全由规则决定
#[derive(Debug, Clone)]
pub struct MobileParser {
    table: CachedTable,
}

impl MobileParser {
    pub fn new(table: Arc<RuleTable>, cache: Arc<dyn PatternCache>) -> Self {
        Self { table: CachedTable::new(table, cache) }
    }
}

impl CategoryParser for MobileParser {
    type Output = DeviceRecord;

    fn name(&self) -> &'static str {
        "mobile"
    }

    fn parse(&self, user_agent: &str) -> Option<DeviceRecord> {
        parse_device(&self.table, None, user_agent)
    }

    fn warm(&self) -> DdResult<()> {
        self.table.warm().map(|_| ())
    }
}

impl DeviceCategoryParser for MobileParser {
    fn pre_check(&self, user_agent: &str) -> bool {
        self.table.compiled().may_match(user_agent)
    }
}

/// 设备解析链：按顺序尝试，返回第一个非空结果
#[derive(Default)]
pub struct DeviceParserChain {
    parsers: Vec<Box<dyn DeviceCategoryParser>>,
}

impl DeviceParserChain {
    pub fn new(parsers: Vec<Box<dyn DeviceCategoryParser>>) -> Self {
        Self { parsers }
    }

    /// 按种类顺序从规则库构建
    pub fn from_kinds(kinds: &[DeviceParserKind], lib: &RuleLibrary, cache: Arc<dyn PatternCache>) -> Self {
        Self::new(kinds.iter().map(|kind| kind.build(lib, cache.clone())).collect())
    }

    pub fn parse(&self, user_agent: &str) -> Option<DeviceRecord> {
        self.parsers
            .iter()
            .filter(|parser| parser.pre_check(user_agent))
            .find_map(|parser| parser.parse(user_agent))
    }

    pub fn warm(&self) -> DdResult<()> {
        self.parsers.iter().try_for_each(|parser| parser.warm())
    }

    pub fn parser_names(&self) -> Vec<&'static str> {
        self.parsers.iter().map(|parser| parser.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl std::fmt::Debug for DeviceParserChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceParserChain")
            .field("parsers", &self.parser_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::MemoryPatternCache;
    use crate::rule::model::{RawRule, RawSubRule};
    use crate::rule::record::UNKNOWN;

    fn library() -> RuleLibrary {
        let mut lib = RuleLibrary::default();
        lib.televisions.rules.push(RawRule {
            regex: "HbbTV/[\\d\\.]+ \\([^;]*;\\s*(Samsung)".to_string(),
            brand: Some("$1".to_string()),
            ..Default::default()
        });
        lib.consoles.rules.push(RawRule {
            regex: "PlayStation 4".to_string(),
            brand: Some("Sony".to_string()),
            model: Some("PlayStation 4".to_string()),
            ..Default::default()
        });
        lib.mobiles.rules.push(RawRule {
            regex: "(?:SAMSUNG-)?(?:SM|GT)-[A-Z0-9]+".to_string(),
            brand: Some("Samsung".to_string()),
            device: Some("smartphone".to_string()),
            models: vec![
                RawSubRule {
                    regex: "SM-T(\\d+)".to_string(),
                    model: Some("Galaxy Tab $1".to_string()),
                    device: Some("tablet".to_string()),
                    ..Default::default()
                },
                RawSubRule {
                    regex: "(?:SM|GT)-([A-Z0-9]+)".to_string(),
                    model: Some("$1".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        });
        lib.mobiles.rules.push(RawRule {
            regex: "Nexus (\\d+)".to_string(),
            brand: Some("Google".to_string()),
            model: Some("Nexus $1".to_string()),
            ..Default::default()
        });
        lib
    }

    fn chain() -> DeviceParserChain {
        DeviceParserChain::from_kinds(
            &DeviceParserKind::DEFAULT_ORDER,
            &library(),
            Arc::new(MemoryPatternCache::new()),
        )
    }

    #[test]
    fn television_defaults_to_tv_type() {
        let device = chain()
            .parse("Mozilla/5.0 (SMART-TV; Linux) HbbTV/1.1.1 (;Samsung;SmartTV2013;T-FXPDEUC;;) WebKit")
            .unwrap();
        assert_eq!(device.device_type, Some(DeviceType::Tv));
        assert_eq!(device.brand, "Samsung");
        assert_eq!(device.model, UNKNOWN);
    }

    #[test]
    fn console_model_from_rule_template() {
        let device = chain().parse("Mozilla/5.0 (PlayStation 4 5.55) AppleWebKit/601.2").unwrap();
        assert_eq!(device.device_type, Some(DeviceType::Console));
        assert_eq!(device.brand, "Sony");
        assert_eq!(device.model, "PlayStation 4");
    }

    #[test]
    fn model_sub_rule_overrides_type() {
        let device = chain().parse("Mozilla/5.0 (Linux; Android 4.4.2; SM-T530 Build/KOT49H)").unwrap();
        assert_eq!(device.device_type, Some(DeviceType::Tablet));
        assert_eq!(device.model, "Galaxy Tab 530");

        let device = chain().parse("Mozilla/5.0 (Linux; Android 4.1.2; GT-I9300 Build/JZO54K)").unwrap();
        assert_eq!(device.device_type, Some(DeviceType::Smartphone));
        assert_eq!(device.brand, "Samsung");
        assert_eq!(device.model, "I9300");
    }

    #[test]
    fn mobile_rule_without_type_leaves_it_unresolved() {
        let device = chain().parse("Mozilla/5.0 (Linux; Android 5.0; Nexus 5 Build/LRX21O)").unwrap();
        assert_eq!(device.device_type, None);
        assert_eq!(device.brand, "Google");
        assert_eq!(device.model, "Nexus 5");
    }

    #[test]
    fn pre_check_has_no_observable_effect() {
        let lib = library();
        let cache: Arc<dyn PatternCache> = Arc::new(MemoryPatternCache::new());
        let parsers: Vec<Box<dyn DeviceCategoryParser>> = DeviceParserKind::DEFAULT_ORDER
            .iter()
            .map(|kind| kind.build(&lib, cache.clone()))
            .collect();
        let inputs = [
            "Mozilla/5.0 (PlayStation 4 5.55)",
            "Mozilla/5.0 (Linux; Android 5.0; Nexus 5)",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
            "",
        ];
        for input in inputs {
            for parser in &parsers {
                if !parser.pre_check(input) {
                    assert!(parser.parse(input).is_none(), "{} 预判与完整匹配不一致：{}", parser.name(), input);
                }
            }
        }
    }

    #[test]
    fn desktop_input_matches_nothing() {
        assert!(chain().parse("Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/90.0").is_none());
        assert!(DeviceParserChain::default().parse("PlayStation 4").is_none());
    }
}
