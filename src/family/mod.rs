//! 家族解析模块
//! 将操作系统/浏览器名称映射为短代码，再由短代码映射为家族名称
//! 纯函数，无状态；对照表在首次使用时建立索引，之后只读共享

mod tables;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use self::tables::{
    BROWSERS, BROWSER_FAMILIES, DESKTOP_OS_FAMILIES, OPERATING_SYSTEMS, OS_FAMILIES, WINDOWS_8_CODES,
};

/// 未识别短代码对应的家族名称
pub const UNKNOWN_FAMILY: &str = "Unknown";

/// 名称（小写） -> 短代码
static OS_CODE_INDEX: Lazy<FxHashMap<String, &'static str>> =
    Lazy::new(|| build_name_index(OPERATING_SYSTEMS));
static BROWSER_CODE_INDEX: Lazy<FxHashMap<String, &'static str>> =
    Lazy::new(|| build_name_index(BROWSERS));

/// 短代码 -> 家族
static OS_FAMILY_INDEX: Lazy<FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| build_family_index(OS_FAMILIES));
static BROWSER_FAMILY_INDEX: Lazy<FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| build_family_index(BROWSER_FAMILIES));

fn build_name_index(table: &'static [(&'static str, &'static str)]) -> FxHashMap<String, &'static str> {
    table
        .iter()
        .map(|(name, code)| (name.to_lowercase(), *code))
        .collect()
}

fn build_family_index(
    table: &'static [(&'static str, &'static [&'static str])],
) -> FxHashMap<&'static str, &'static str> {
    let mut index = FxHashMap::default();
    for (family, codes) in table {
        for code in codes.iter() {
            index.insert(*code, *family);
        }
    }
    index
}

/// 家族解析器
pub struct FamilyResolver;

impl FamilyResolver {
    /// 操作系统名称 -> 短代码（大小写不敏感）
    pub fn os_short_code(name: &str) -> Option<&'static str> {
        OS_CODE_INDEX.get(&name.trim().to_lowercase()).copied()
    }

    /// 操作系统短代码 -> 家族，未知返回 `Unknown`
    pub fn os_family(short_code: &str) -> &'static str {
        OS_FAMILY_INDEX.get(short_code).copied().unwrap_or(UNKNOWN_FAMILY)
    }

    /// 浏览器名称 -> 短代码（大小写不敏感）
    pub fn browser_short_code(name: &str) -> Option<&'static str> {
        BROWSER_CODE_INDEX.get(&name.trim().to_lowercase()).copied()
    }

    /// 浏览器短代码 -> 家族，未知返回 `Unknown`
    pub fn browser_family(short_code: &str) -> &'static str {
        BROWSER_FAMILY_INDEX.get(short_code).copied().unwrap_or(UNKNOWN_FAMILY)
    }

    /// 短代码所属家族是否为桌面操作系统家族
    pub fn is_desktop_os(short_code: &str) -> bool {
        DESKTOP_OS_FAMILIES.contains(&Self::os_family(short_code))
    }

    /// 短代码是否属于 Windows 8 家族
    pub fn is_windows_8(short_code: &str) -> bool {
        WINDOWS_8_CODES.contains(&short_code)
    }

    /// 全部已知操作系统短代码
    pub fn os_short_codes() -> impl Iterator<Item = &'static str> {
        OPERATING_SYSTEMS.iter().map(|(_, code)| *code)
    }

    /// 桌面家族目录
    pub fn desktop_families() -> &'static [&'static str] {
        DESKTOP_OS_FAMILIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_os_names_to_families() {
        assert_eq!(FamilyResolver::os_short_code("Windows 10"), Some("W10"));
        assert_eq!(FamilyResolver::os_family("W10"), "Windows");
        assert_eq!(FamilyResolver::os_short_code("android"), Some("AND"));
        assert_eq!(FamilyResolver::os_family("AND"), "Android");
        assert_eq!(FamilyResolver::os_family("OS2"), "IBM");
        assert_eq!(FamilyResolver::os_family("???"), UNKNOWN_FAMILY);
        assert_eq!(FamilyResolver::os_short_code("TempleOS"), None);
    }

    #[test]
    fn resolves_browser_families() {
        assert_eq!(FamilyResolver::browser_short_code("Chrome Mobile"), Some("CM"));
        assert_eq!(FamilyResolver::browser_family("CM"), "Chrome");
        assert_eq!(FamilyResolver::browser_family("MF"), "Safari");
        assert_eq!(FamilyResolver::browser_family("PS"), "Internet Explorer");
        assert_eq!(FamilyResolver::browser_family("UC"), UNKNOWN_FAMILY);
    }

    #[test]
    fn every_os_code_has_at_most_one_family() {
        let mut seen = FxHashMap::default();
        for (family, codes) in OS_FAMILIES {
            for code in codes.iter() {
                assert!(seen.insert(*code, *family).is_none(), "重复短代码：{}", code);
            }
        }
    }

    #[test]
    fn desktop_catalogue() {
        for code in ["WIN", "W81", "MAC", "UBT", "LIN", "BSD", "OS2", "BEO", "AMG"] {
            assert!(FamilyResolver::is_desktop_os(code), "{} 应为桌面系统", code);
        }
        for code in ["AND", "IOS", "WPH", "COS", "PS3", "UNK"] {
            assert!(!FamilyResolver::is_desktop_os(code), "{} 不应为桌面系统", code);
        }
        assert!(FamilyResolver::is_windows_8("WRT"));
        assert!(!FamilyResolver::is_windows_8("W10"));
    }
}
