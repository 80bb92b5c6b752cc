//! 整词匹配工具

use once_cell::sync::Lazy;
use regex::Regex;

/// 独立的 `Touch` 词（大小写不敏感，不匹配 `Touchpad` 等更长单词的一部分）
static TOUCH_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z0-9])touch(?:[^a-z0-9]|$)").expect("内置 Touch 正则无效")
});

/// 输入中是否包含独立的 `Touch` 词
pub fn has_touch_token(input: &str) -> bool {
    TOUCH_TOKEN.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_must_be_a_whole_token() {
        assert!(has_touch_token("Mozilla/5.0 (Windows NT 6.2; ARM; Trident/6.0; Touch)"));
        assert!(has_touch_token("touch"));
        assert!(has_touch_token("Windows; TOUCH; rv:11.0"));
        assert!(!has_touch_token("Mozilla/5.0 (Windows NT 6.2; Touchpad)"));
        assert!(!has_touch_token("MultiTouch device"));
        assert!(!has_touch_token("Windows NT 10.0"));
    }
}
