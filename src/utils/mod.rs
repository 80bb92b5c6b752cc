//! 通用工具模块：模板展开、版本号比较、整词匹配
pub mod template;
pub mod version;
pub mod token;

pub use self::template::{CaptureGroups, TemplateExpander};
pub use self::version::DottedVersion;
pub use self::token::has_touch_token;
