//! 设备类型启发式规则
//! 仅在设备解析链未给出设备类型时使用，按固定顺序评估，第一条适用的规则生效：
//! 1. 桌面系统家族 -> desktop
//! 2. Android 版本：< 2.0 -> smartphone；[3.0, 4.0) -> tablet；其余不处理
//! 3. Windows 8 家族 + 独立的 `Touch` 词 -> tablet

use std::cmp::Ordering;

use crate::family::FamilyResolver;
use crate::rule::record::{DeviceType, OsRecord};
use crate::utils::{has_touch_token, DottedVersion};

/// Android 操作系统短代码
const ANDROID_CODE: &str = "AND";

/// 按顺序评估全部启发式规则
pub fn infer_device_type(os: &OsRecord, user_agent: &str) -> Option<DeviceType> {
    desktop_override(os)
        .or_else(|| android_version_override(os))
        .or_else(|| touch_override(os, user_agent))
}

/// 桌面系统家族 -> desktop
pub fn desktop_override(os: &OsRecord) -> Option<DeviceType> {
    FamilyResolver::is_desktop_os(&os.short_name).then_some(DeviceType::Desktop)
}

/// 按 Android 版本推断；2.x 与 4.0 及以上无法区分手机/平板，保持未知
pub fn android_version_override(os: &OsRecord) -> Option<DeviceType> {
    if os.short_name != ANDROID_CODE {
        return None;
    }
    let version = DottedVersion::parse(&os.version)?;

    if version.compare_str("2.0")? == Ordering::Less {
        return Some(DeviceType::Smartphone);
    }
    if version.compare_str("3.0")? != Ordering::Less && version.compare_str("4.0")? == Ordering::Less {
        return Some(DeviceType::Tablet);
    }
    None
}

/// Windows 8 家族且带有 `Touch` 词 -> tablet
pub fn touch_override(os: &OsRecord, user_agent: &str) -> Option<DeviceType> {
    (FamilyResolver::is_windows_8(&os.short_name) && has_touch_token(user_agent))
        .then_some(DeviceType::Tablet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::record::UNKNOWN;

    fn os(short_name: &str, version: &str) -> OsRecord {
        OsRecord {
            name: "test".to_string(),
            short_name: short_name.to_string(),
            version: version.to_string(),
        }
    }

    #[test]
    fn android_boundaries() {
        let cases = [
            ("1.9", Some(DeviceType::Smartphone)),
            ("1.0", Some(DeviceType::Smartphone)),
            ("2.0", None),
            ("2.9", None),
            ("3.0", Some(DeviceType::Tablet)),
            ("3.2.1", Some(DeviceType::Tablet)),
            ("3.9", Some(DeviceType::Tablet)),
            ("4.0", None),
            ("4.4.2", None),
            ("10", None),
        ];
        for (version, expected) in cases {
            assert_eq!(android_version_override(&os("AND", version)), expected, "版本 {}", version);
        }
    }

    #[test]
    fn android_unparsable_version_is_skipped() {
        assert_eq!(android_version_override(&os("AND", UNKNOWN)), None);
        assert_eq!(android_version_override(&os("AND", "3.x")), None);
        // 非 Android 代码不适用
        assert_eq!(android_version_override(&os("IOS", "1.0")), None);
    }

    #[test]
    fn touch_requires_windows_8_family() {
        let ua = "Mozilla/5.0 (compatible; MSIE 10.0; Windows NT 6.2; ARM; Trident/6.0; Touch)";
        for code in ["WI8", "W81", "WRT"] {
            assert_eq!(touch_override(&os(code, "8"), ua), Some(DeviceType::Tablet));
        }
        for code in ["W10", "WI7", "AND", "LIN", UNKNOWN] {
            assert_eq!(touch_override(&os(code, "8"), ua), None, "{}", code);
        }
        assert_eq!(touch_override(&os("WI8", "8"), "Windows NT 6.2; Touchpad"), None);
    }

    #[test]
    fn desktop_override_precedes_touch() {
        // Windows 8 同时属于桌面家族，桌面规则先生效
        let ua = "Mozilla/5.0 (Windows NT 6.2; Touch)";
        assert_eq!(infer_device_type(&os("WI8", "8"), ua), Some(DeviceType::Desktop));
        assert_eq!(infer_device_type(&os("AND", "3.1"), ua), Some(DeviceType::Tablet));
        assert_eq!(infer_device_type(&os(UNKNOWN, UNKNOWN), ua), None);
    }
}
