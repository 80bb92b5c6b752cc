//! 操作系统解析器

use std::sync::Arc;

use super::matcher::first_match;
use super::CategoryParser;
use crate::compiler::{CachedTable, PatternCache};
use crate::error::DdResult;
use crate::family::FamilyResolver;
use crate::rule::model::RuleTable;
use crate::rule::record::{or_unknown, OsRecord, UNKNOWN};

/// 操作系统解析器
#[derive(Debug, Clone)]
pub struct OsParser {
    table: CachedTable,
}

impl OsParser {
    pub fn new(table: Arc<RuleTable>, cache: Arc<dyn PatternCache>) -> Self {
        Self {
            table: CachedTable::new(table, cache),
        }
    }

    /// 始终返回记录，未命中时全部字段为 `UNK`
    pub fn parse_or_default(&self, user_agent: &str) -> OsRecord {
        self.parse(user_agent).unwrap_or_default()
    }
}

impl CategoryParser for OsParser {
    type Output = OsRecord;

    fn name(&self) -> &'static str {
        "os"
    }

    fn parse(&self, user_agent: &str) -> Option<OsRecord> {
        let compiled = self.table.compiled();
        let matched = first_match(&compiled, user_agent)?;

        let name = matched.expand(matched.rule.name.as_deref());
        let short_name = FamilyResolver::os_short_code(&name).unwrap_or(UNKNOWN);

        Some(OsRecord {
            short_name: short_name.to_string(),
            version: or_unknown(matched.version(user_agent)),
            name: or_unknown(name),
        })
    }

    fn warm(&self) -> DdResult<()> {
        self.table.warm().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::MemoryPatternCache;
    use crate::rule::model::RawRule;

    fn parser() -> OsParser {
        let rules = vec![
            RawRule::named("Windows NT 10\\.0", "Windows 10").with_version(""),
            RawRule::named("Windows NT 6\\.3; ARM", "Windows RT").with_version("8.1"),
            RawRule::named("Android[ /]?([\\d\\.]+)?", "Android").with_version("$1"),
            RawRule::named("(Hurd)", "$1"),
        ];
        OsParser::new(Arc::new(RuleTable::new("oss", rules)), Arc::new(MemoryPatternCache::new()))
    }

    #[test]
    fn resolves_short_code_and_version() {
        let os = parser().parse_or_default("Mozilla/5.0 (Linux; Android 4.4.2; Nexus 5)");
        assert_eq!(os.name, "Android");
        assert_eq!(os.short_name, "AND");
        assert_eq!(os.version, "4.4.2");

        let os = parser().parse_or_default("Mozilla/5.0 (Windows NT 6.3; ARM; Trident/7.0; Touch)");
        assert_eq!(os.short_name, "WRT");
        assert_eq!(os.version, "8.1");
    }

    #[test]
    fn missing_fields_become_sentinel() {
        let os = parser().parse_or_default("Mozilla/5.0 (Windows NT 10.0; Win64; x64)");
        assert_eq!(os.short_name, "W10");
        assert_eq!(os.version, UNKNOWN);

        // 名称不在对照表中
        let os = parser().parse_or_default("Mozilla/5.0 (GNU Hurd)");
        assert_eq!(os.name, "Hurd");
        assert_eq!(os.short_name, UNKNOWN);
    }

    #[test]
    fn no_match_yields_default_record() {
        assert_eq!(parser().parse_or_default("curl/8.1.2"), OsRecord::default());
    }
}
