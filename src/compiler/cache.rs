//! 编译缓存
//! 以规则表标识（含内容指纹）为键缓存编译结果，同一规则表在进程内只编译一次
//!
//! 缓存是可插拔能力：任何实现 [`PatternCache`] 的存储都可以替换默认的内存缓存。
//! 缓存失效或读写失败只会导致重新编译，不会影响识别结果。

use std::fmt;
use std::sync::{Arc, RwLock};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use tracing::{debug, error};

use super::compiler::RuleCompiler;
use super::pattern::CompiledRuleTable;
use crate::error::DdResult;
use crate::rule::model::RuleTable;

/// 编译缓存能力接口
pub trait PatternCache: Send + Sync {
    /// 读取缓存，未命中返回 None
    fn get(&self, key: &str) -> Option<Arc<CompiledRuleTable>>;
    /// 写入缓存
    fn set(&self, key: &str, value: Arc<CompiledRuleTable>);
}

/// 默认内存缓存（读写锁 + FxHashMap）
#[derive(Default)]
pub struct MemoryPatternCache {
    entries: RwLock<FxHashMap<String, Arc<CompiledRuleTable>>>,
}

impl MemoryPatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

impl PatternCache for MemoryPatternCache {
    fn get(&self, key: &str) -> Option<Arc<CompiledRuleTable>> {
        // 锁中毒按未命中处理
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Arc<CompiledRuleTable>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value);
        }
    }
}

impl fmt::Debug for MemoryPatternCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryPatternCache")
            .field("entries", &self.len())
            .finish()
    }
}

/// 进程级默认缓存
static GLOBAL_PATTERN_CACHE: Lazy<Arc<MemoryPatternCache>> =
    Lazy::new(|| Arc::new(MemoryPatternCache::new()));

/// 获取进程级默认缓存句柄
pub fn default_pattern_cache() -> Arc<dyn PatternCache> {
    GLOBAL_PATTERN_CACHE.clone()
}

/// 绑定了编译缓存的规则表
/// 解析器持有该句柄，每次匹配时从缓存取编译结果，未命中则编译并回填
#[derive(Clone)]
pub struct CachedTable {
    table: Arc<RuleTable>,
    key: String,
    cache: Arc<dyn PatternCache>,
}

impl CachedTable {
    pub fn new(table: Arc<RuleTable>, cache: Arc<dyn PatternCache>) -> Self {
        let key = table.cache_key();
        Self { table, key, cache }
    }

    pub fn id(&self) -> &str {
        &self.table.id
    }

    pub fn cache_key(&self) -> &str {
        &self.key
    }

    /// 读取或编译规则表，编译错误原样返回
    /// 检测器构造阶段调用，用于尽早暴露损坏的规则表
    pub fn warm(&self) -> DdResult<Arc<CompiledRuleTable>> {
        if let Some(compiled) = self.cache.get(&self.key) {
            return Ok(compiled);
        }

        debug!("编译缓存未命中，开始编译规则表 [{}]", self.table.id);
        let compiled = Arc::new(RuleCompiler::compile_table(&self.table)?);
        self.cache.set(&self.key, compiled.clone());
        Ok(compiled)
    }

    /// 识别阶段使用：编译失败时按空表处理并记录错误
    pub fn compiled(&self) -> Arc<CompiledRuleTable> {
        self.warm().unwrap_or_else(|e| {
            error!("规则表 [{}] 编译失败，按空表处理：{}", self.table.id, e);
            Arc::new(CompiledRuleTable::empty(self.table.id.clone()))
        })
    }
}

impl fmt::Debug for CachedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedTable")
            .field("id", &self.table.id)
            .field("rules", &self.table.len())
            .field("key", &self.key)
            .finish()
    }
}
