//! 检测结果记录定义
//! 未识别的字符串字段统一使用哨兵值 `UNK`，调用方无需处理空值

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Serializer};

use crate::error::{DdResult, DeviceDetectorError};

/// 未知字段哨兵值
pub const UNKNOWN: &str = "UNK";

/// 设备类型
/// 枚举序号属于对外契约（调用方可能持久化），顺序不可调整
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DeviceType {
    Desktop = 0,
    Smartphone = 1,
    Tablet = 2,
    FeaturePhone = 3,
    Console = 4,
    Tv = 5,
    CarBrowser = 6,
    SmartDisplay = 7,
    Camera = 8,
}

impl DeviceType {
    /// 全部设备类型（按序号排列）
    pub const ALL: [DeviceType; 9] = [
        DeviceType::Desktop,
        DeviceType::Smartphone,
        DeviceType::Tablet,
        DeviceType::FeaturePhone,
        DeviceType::Console,
        DeviceType::Tv,
        DeviceType::CarBrowser,
        DeviceType::SmartDisplay,
        DeviceType::Camera,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// 规则表中使用的类型标签
    pub fn label(self) -> &'static str {
        match self {
            DeviceType::Desktop => "desktop",
            DeviceType::Smartphone => "smartphone",
            DeviceType::Tablet => "tablet",
            DeviceType::FeaturePhone => "feature phone",
            DeviceType::Console => "console",
            DeviceType::Tv => "tv",
            DeviceType::CarBrowser => "car browser",
            DeviceType::SmartDisplay => "smart display",
            DeviceType::Camera => "camera",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DeviceType {
    type Err = DeviceDetectorError;

    fn from_str(s: &str) -> DdResult<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.label() == normalized)
            .ok_or_else(|| DeviceDetectorError::RuleParseError(format!("未知设备类型标签：{}", s)))
    }
}

impl Serialize for DeviceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// 客户端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientType {
    FeedReader,
    MobileApp,
    MediaPlayer,
    Pim,
    Browser,
}

impl ClientType {
    pub fn label(self) -> &'static str {
        match self {
            ClientType::FeedReader => "feed reader",
            ClientType::MobileApp => "mobile app",
            ClientType::MediaPlayer => "mediaplayer",
            ClientType::Pim => "pim",
            ClientType::Browser => "browser",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ClientType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// 操作系统识别结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OsRecord {
    pub name: String,
    pub short_name: String,
    pub version: String,
}

impl Default for OsRecord {
    fn default() -> Self {
        Self {
            name: UNKNOWN.to_string(),
            short_name: UNKNOWN.to_string(),
            version: UNKNOWN.to_string(),
        }
    }
}

/// 客户端识别结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRecord {
    #[serde(rename = "type")]
    pub client_type: Option<ClientType>,
    pub name: String,
    pub short_name: String,
    pub version: String,
}

impl Default for ClientRecord {
    fn default() -> Self {
        Self {
            client_type: None,
            name: UNKNOWN.to_string(),
            short_name: UNKNOWN.to_string(),
            version: UNKNOWN.to_string(),
        }
    }
}

/// 设备识别结果
/// 设备类型与品牌/型号相互独立：类型可由启发式规则补全，而品牌型号保持未知
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    #[serde(rename = "type")]
    pub device_type: Option<DeviceType>,
    pub brand: String,
    pub model: String,
}

impl Default for DeviceRecord {
    fn default() -> Self {
        Self {
            device_type: None,
            brand: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
        }
    }
}

/// 爬虫识别结果
/// 精简模式下仅表示“命中爬虫”，其余字段保持默认值
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotRecord {
    pub name: String,
    pub category: String,
    pub url: String,
    pub producer_name: String,
    pub producer_url: String,
}

impl BotRecord {
    /// 仅表示命中的精简记录
    pub fn presence_only() -> Self {
        Self::default()
    }
}

impl Default for BotRecord {
    fn default() -> Self {
        Self {
            name: UNKNOWN.to_string(),
            category: UNKNOWN.to_string(),
            url: UNKNOWN.to_string(),
            producer_name: UNKNOWN.to_string(),
            producer_url: UNKNOWN.to_string(),
        }
    }
}

/// 空字符串转换为哨兵值
pub(crate) fn or_unknown(value: String) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value
    }
}
