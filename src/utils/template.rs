//! 提取模板工具模块
//! 负责将规则中的名称/版本/型号模板按正则捕获结果展开
//! 支持 \1/\2 或 $1/$2 两种分组引用格式，缺失的分组替换为空串

/// 捕获分组读取接口（regex 与 fancy-regex 共用）
pub trait CaptureGroups {
    /// 第 index 个分组的文本，未参与匹配返回 None
    fn group(&self, index: usize) -> Option<&str>;
    /// 分组总数（含第 0 组）
    fn group_count(&self) -> usize;
}

impl CaptureGroups for regex::Captures<'_> {
    fn group(&self, index: usize) -> Option<&str> {
        self.get(index).map(|m| m.as_str())
    }

    fn group_count(&self) -> usize {
        self.len()
    }
}

impl CaptureGroups for fancy_regex::Captures<'_> {
    fn group(&self, index: usize) -> Option<&str> {
        self.get(index).map(|m| m.as_str())
    }

    fn group_count(&self) -> usize {
        self.len()
    }
}

/// 模板展开工具
pub struct TemplateExpander;

impl TemplateExpander {
    /// 展开模板并去除首尾空白
    ///
    /// 只从左到右扫描一遍模板本身，捕获文本原样写入结果，不再参与替换。
    /// 引用的数字串优先按最长的有效分组序号解析（`$10` 在存在第 10 组时取第 10 组，
    /// 否则取第 1 组并保留 `0`）；没有任何有效前缀时整段引用替换为空串。
    pub fn expand<C: CaptureGroups + ?Sized>(template: &str, captures: &C) -> String {
        let mut expanded = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(pos) = rest.find(['$', '\\']) {
            expanded.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            let digits = after.len() - after.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            if digits == 0 {
                expanded.push_str(&rest[pos..pos + 1]);
                rest = after;
                continue;
            }

            let reference = &after[..digits];
            if let Some(width) = Self::group_width(reference, captures.group_count()) {
                // 前缀已校验为数字且在分组范围内
                let index: usize = reference[..width].parse().unwrap_or(0);
                expanded.push_str(captures.group(index).map(str::trim).unwrap_or(""));
                expanded.push_str(&reference[width..]);
            }
            rest = &after[digits..];
        }
        expanded.push_str(rest);

        expanded.trim().to_string()
    }

    /// 数字串中可作为分组序号的最长前缀长度
    fn group_width(reference: &str, group_count: usize) -> Option<usize> {
        (1..=reference.len()).rev().find(|&width| {
            reference[..width]
                .parse::<usize>()
                .is_ok_and(|index| index >= 1 && index < group_count)
        })
    }

    /// 展开版本模板：下划线视为点号，去除尾部多余的点与空白
    pub fn expand_version<C: CaptureGroups + ?Sized>(template: &str, captures: &C) -> String {
        let version = Self::expand(template, captures).replace('_', ".");
        version.trim_end_matches(['.', ' ']).trim().to_string()
    }

    /// 展开型号模板：下划线视为空格，去除尾部 ` TD` 标记，单独的 `Build` 视为无型号
    pub fn expand_model<C: CaptureGroups + ?Sized>(template: &str, captures: &C) -> String {
        let mut model = Self::expand(template, captures).replace('_', " ");
        if let Some(stripped) = model.strip_suffix(" TD") {
            model = stripped.to_string();
        }
        let model = model.trim();
        if model.eq_ignore_ascii_case("build") {
            return String::new();
        }
        model.to_string()
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_expand_with_dollar_placeholder() {
        let regex = Regex::new(r#"Chrome/(\d+[\.\d]+)"#).unwrap();
        let captures = regex.captures("Chrome/90.0.4430").unwrap();
        assert_eq!(TemplateExpander::expand("$1", &captures), "90.0.4430");
    }

    #[test]
    fn test_expand_with_backslash_placeholder() {
        let regex = Regex::new(r#"(\w+)/v([\d.]+)"#).unwrap();
        let captures = regex.captures("rust/v1.75.0").unwrap();
        assert_eq!(TemplateExpander::expand("\\1 \\2", &captures), "rust 1.75.0");
    }

    #[test]
    fn test_expand_literal_template() {
        let regex = Regex::new(r#"Googlebot"#).unwrap();
        let captures = regex.captures("Googlebot/2.1").unwrap();
        assert_eq!(TemplateExpander::expand(" Googlebot ", &captures), "Googlebot");
    }

    #[test]
    fn test_expand_missing_group_is_empty() {
        // 可选分组未参与匹配
        let regex = Regex::new(r#"Opera(?:/(\d+))?"#).unwrap();
        let captures = regex.captures("Opera").unwrap();
        assert_eq!(TemplateExpander::expand("Opera $1", &captures), "Opera");
        // 引用不存在的分组
        assert_eq!(TemplateExpander::expand("$1.$2", &captures), ".");
    }

    #[test]
    fn test_expand_double_digit_groups() {
        let regex = Regex::new(r#"(a)(b)(c)(d)(e)(f)(g)(h)(i)(j)"#).unwrap();
        let captures = regex.captures("abcdefghij").unwrap();
        assert_eq!(TemplateExpander::expand("$10-$1", &captures), "j-a");
    }

    #[test]
    fn test_expand_version_normalizes_separators() {
        let regex = Regex::new(r#"Android ([\d_\.]+)"#).unwrap();
        let captures = regex.captures("Android 4_4_2.").unwrap();
        assert_eq!(TemplateExpander::expand_version("$1", &captures), "4.4.2");
    }

    #[test]
    fn test_expand_model_cleanup() {
        let regex = Regex::new(r#"Model/([\w ]+)"#).unwrap();
        let captures = regex.captures("Model/GT_I9300 TD").unwrap();
        assert_eq!(TemplateExpander::expand_model("$1", &captures), "GT I9300");

        let captures = regex.captures("Model/Build").unwrap();
        assert_eq!(TemplateExpander::expand_model("$1", &captures), "");
    }

    #[test]
    fn test_expand_does_not_rescan_captured_text() {
        // 捕获文本中出现的 `$1` / `\1` 原样保留
        let regex = Regex::new(r#"App/(\S+)"#).unwrap();
        let captures = regex.captures("App/v$1x").unwrap();
        assert_eq!(TemplateExpander::expand("$1", &captures), "v$1x");

        let captures = regex.captures(r#"App/a\2b"#).unwrap();
        assert_eq!(TemplateExpander::expand("$1 $2", &captures), r#"a\2b"#);
    }

    #[test]
    fn test_expand_keeps_non_placeholder_symbols() {
        let regex = Regex::new(r#"Price/(\d+)"#).unwrap();
        let captures = regex.captures("Price/5").unwrap();
        assert_eq!(TemplateExpander::expand("$ $1 \\x", &captures), "$ 5 \\x");
        // 第 10 组不存在时按 `$1` + `0` 解析
        assert_eq!(TemplateExpander::expand("$10", &captures), "50");
    }

    #[test]
    fn test_expand_fancy_captures() {
        let regex = fancy_regex::Regex::new(r#"Chrome(?!/\d+ Edge)/(\d+)"#).unwrap();
        let captures = regex.captures("Chrome/90 Safari").unwrap().unwrap();
        assert_eq!(TemplateExpander::expand("Chrome $1", &captures), "Chrome 90");
    }
}
