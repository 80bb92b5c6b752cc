//! 识别结果
//! 每次识别新建，一次计算完成，不持有任何资源

use std::fmt;
use serde::Serialize;

use super::heuristics::desktop_override;
use crate::family::{FamilyResolver, UNKNOWN_FAMILY};
use crate::rule::record::{
    BotRecord, ClientRecord, ClientType, DeviceRecord, DeviceType, OsRecord, UNKNOWN,
};
use crate::utils::has_touch_token;

/// 完整识别结果
/// 命中爬虫时 os/client/device 保持默认值
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectResult {
    pub user_agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot: Option<BotRecord>,
    pub os: OsRecord,
    pub client: ClientRecord,
    pub device: DeviceRecord,
    pub os_family: String,
    pub browser_family: String,
}

impl DetectResult {
    /// 全部字段为默认值的结果
    pub fn unresolved(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            bot: None,
            os: OsRecord::default(),
            client: ClientRecord::default(),
            device: DeviceRecord::default(),
            os_family: UNKNOWN_FAMILY.to_string(),
            browser_family: UNKNOWN_FAMILY.to_string(),
        }
    }

    /// 爬虫终止结果
    pub fn bot(user_agent: &str, bot: BotRecord) -> Self {
        Self {
            bot: Some(bot),
            ..Self::unresolved(user_agent)
        }
    }

    /// 根据 os/client 回填家族字段
    pub(crate) fn resolve_families(&mut self) {
        self.os_family = FamilyResolver::os_family(&self.os.short_name).to_string();
        self.browser_family = match self.client.client_type {
            Some(ClientType::Browser) => FamilyResolver::browser_family(&self.client.short_name).to_string(),
            _ => UNKNOWN_FAMILY.to_string(),
        };
    }

    pub fn is_bot(&self) -> bool {
        self.bot.is_some()
    }

    /// 操作系统家族是否属于桌面家族（与设备类型桌面启发式规则判定一致）
    pub fn is_desktop(&self) -> bool {
        desktop_override(&self.os).is_some()
    }

    /// 非桌面即视为移动端
    /// 爬虫结果始终返回 false，与操作系统字段无关
    pub fn is_mobile(&self) -> bool {
        !self.is_bot() && !self.is_desktop()
    }

    /// UA 中是否包含独立的 `Touch` 词，与操作系统无关
    pub fn is_touch_enabled(&self) -> bool {
        has_touch_token(&self.user_agent)
    }

    pub fn device_type(&self) -> Option<DeviceType> {
        self.device.device_type
    }

    /// 设备类型名称，未知返回 `UNK`
    pub fn device_type_name(&self) -> &'static str {
        self.device.device_type.map(DeviceType::label).unwrap_or(UNKNOWN)
    }

    pub fn os_family(&self) -> &str {
        &self.os_family
    }

    pub fn browser_family(&self) -> &str {
        &self.browser_family
    }
}

impl fmt::Display for DetectResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(bot) = &self.bot {
            return write!(f, "bot: {}", bot.name);
        }
        write!(
            f,
            "os: {} {} | client: {} {} | device: {} {} {}",
            self.os.name,
            self.os.version,
            self.client.name,
            self.client.version,
            self.device_type_name(),
            self.device.brand,
            self.device.model
        )
    }
}
