//! 规则模块：负责规则的加载、快照、数据模型与识别记录定义
pub mod model;
pub mod record;
pub mod cache;
pub mod loader;

// 导出核心接口
pub use self::model::{table_id, BotProducer, RawRule, RawSubRule, RuleLibrary, RuleTable};
pub use self::record::{
    BotRecord, ClientRecord, ClientType, DeviceRecord, DeviceType, OsRecord, UNKNOWN,
};
pub use self::loader::RuleLoader;
pub use self::cache::RuleCacheManager;
