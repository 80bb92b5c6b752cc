//! rsdevicedetector - 基于规则表的 User-Agent 识别库
//!
//! 识别流程：爬虫 -> 操作系统 -> 客户端链 -> 设备链 -> 设备类型启发式规则

// 导出全局错误类型
pub use self::error::{DeviceDetectorError, DdResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder, DetectorOptions};

// 导出规则模块核心接口
pub use self::rule::{
    BotRecord, ClientRecord, ClientType, DeviceRecord, DeviceType, OsRecord, RawRule, RawSubRule,
    RuleLibrary, RuleTable, RuleLoader, RuleCacheManager, UNKNOWN,
};

// 导出编译模块核心接口
pub use self::compiler::{
    CompiledRuleTable, RuleCompiler, RulePattern, PatternCache, MemoryPatternCache, default_pattern_cache,
};

// 导出解析模块核心接口
pub use self::parser::{CategoryParser, ClientParserKind, DeviceParserKind};

// 导出家族对照
pub use self::family::{FamilyResolver, UNKNOWN_FAMILY};

// 导出检测模块核心接口
pub use self::detector::{
    DeviceDetector,
    DetectResult,
    ClientTypeRegistry,
    init_device_detector,
    init_device_detector_with_options,
    init_device_detector_with_rules,
    detect_user_agent,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod compiler;
pub mod parser;
pub mod family;
pub mod utils;
pub mod detector;
