//! 点分数字版本号工具
//! 无法解析的版本号返回 None，由调用方决定跳过相关判断

use std::cmp::Ordering;

/// 点分数字版本号（如 `4.4.2`）
#[derive(Debug, Clone)]
pub struct DottedVersion {
    parts: Vec<u64>,
}

impl DottedVersion {
    /// 解析版本号，要求每一段都是纯数字
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let parts = raw
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    part.parse::<u64>().ok()
                }
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { parts })
    }

    /// 与另一版本号字符串比较，对方无法解析时返回 None
    pub fn compare_str(&self, other: &str) -> Option<Ordering> {
        Self::parse(other).map(|other| self.cmp(&other))
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // 缺失的段按 0 补齐：2 == 2.0 == 2.0.0
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let a = self.parts.get(i).copied().unwrap_or(0);
            let b = other.parts.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                non_eq => return non_eq,
            }
        }
        Ordering::Equal
    }
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DottedVersion {}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
