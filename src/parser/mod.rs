//! 解析模块：各分类解析器与解析链
//!
//! 每个分类解析器都是独立的结构体，实现统一的 [`CategoryParser`] 接口，
//! 匹配算法统一复用 [`matcher`] 中的首条命中逻辑，各自只负责字段提取。
pub mod matcher;
pub mod bot;
pub mod os;
pub mod client;
pub mod device;

use crate::error::DdResult;

pub use self::bot::BotParser;
pub use self::os::OsParser;
pub use self::client::{
    BrowserParser, ClientCategoryParser, ClientParserChain, ClientParserKind, FeedReaderParser,
    MediaPlayerParser, MobileAppParser, PimParser,
};
pub use self::device::{
    ConsoleParser, DeviceCategoryParser, DeviceParserChain, DeviceParserKind, MobileParser,
    TelevisionParser,
};

/// 分类解析器统一接口
pub trait CategoryParser: Send + Sync {
    type Output;

    /// 解析器名称（日志与注册表使用）
    fn name(&self) -> &'static str;

    /// 解析输入，未命中返回 None
    fn parse(&self, user_agent: &str) -> Option<Self::Output>;

    /// 预编译规则表，暴露规则错误
    fn warm(&self) -> DdResult<()> {
        Ok(())
    }
}
