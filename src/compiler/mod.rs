//! 编译模块：将原始规则表编译为可执行的正则模式，并按规则表缓存编译结果
pub mod pattern;
pub mod compiler;
pub mod cache;

pub use self::pattern::{CompiledRule, CompiledRuleTable, CompiledSubRule, RuleCaptures, RulePattern};
pub use self::compiler::RuleCompiler;
pub use self::cache::{default_pattern_cache, CachedTable, MemoryPatternCache, PatternCache};
