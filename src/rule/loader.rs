//! 规则加载管理器
//! 负责从本地快照或规则目录加载规则库

use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

use super::cache::RuleCacheManager;
use super::model::{table_id, RawRule, RuleLibrary, RuleTable};
use crate::config::GlobalConfig;
use crate::error::{DdResult, DeviceDetectorError};

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 加载规则库（优先本地快照，快照不可用则读取规则目录）
    pub async fn load(config: &GlobalConfig) -> DdResult<RuleLibrary> {
        // 1. 优先加载本地快照
        if config.use_rule_cache {
            match RuleCacheManager::load_from_cache(config).await {
                Ok(rule_lib) => {
                    debug!("从本地快照加载规则库成功：{}", config.rule_cache_path.display());
                    return Ok(rule_lib);
                }
                Err(e) => warn!("本地快照不存在或损坏，将读取规则目录：{}", e),
            }
        }

        // 2. 读取规则目录
        let rule_lib = Self::load_dir(&config.rules_dir).await?;

        // 3. 写入本地快照
        if config.use_rule_cache {
            if let Err(e) = RuleCacheManager::save_to_cache(config, &rule_lib).await {
                warn!("规则库写入本地快照失败：{}", e);
            } else {
                debug!("规则库已写入本地快照");
            }
        }

        Ok(rule_lib)
    }

    /// 读取规则目录下的全部规则表
    /// 单个文件缺失按空表处理，内容格式错误直接返回错误
    pub async fn load_dir(dir: &Path) -> DdResult<RuleLibrary> {
        let is_dir = tokio::fs::metadata(dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(DeviceDetectorError::RuleLoadError(format!(
                "规则目录不存在：{}",
                dir.display()
            )));
        }

        let mut rule_lib = RuleLibrary::default();
        for id in table_id::ALL {
            let path = dir.join(format!("{}.json", id));
            let data = match tokio::fs::read(&path).await {
                Ok(data) => data,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!("规则文件缺失，按空表处理：{}", path.display());
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let table = Self::parse_rules(id, &data)?;
            debug!("规则表 [{}] 加载完成，规则数：{}", id, table.len());
            if let Some(slot) = rule_lib.table_mut(id) {
                *slot = table;
            }
        }

        debug!("规则目录加载完成：{}，规则总数：{}", dir.display(), rule_lib.rule_count());
        Ok(rule_lib)
    }

    /// 解析单个规则文件（JSON 规则数组）
    pub fn parse_rules(id: &str, data: &[u8]) -> DdResult<RuleTable> {
        let rules: Vec<RawRule> = serde_json::from_slice(data).map_err(|e| {
            DeviceDetectorError::RuleParseError(format!("规则表 [{}] 格式错误：{}", id, e))
        })?;
        Ok(RuleTable::new(id, rules))
    }

    /// 从单个 JSON 文档解析完整规则库
    pub fn from_json_str(json: &str) -> DdResult<RuleLibrary> {
        let mut rule_lib: RuleLibrary = serde_json::from_str(json)?;
        rule_lib.normalize_ids();
        Ok(rule_lib)
    }
}
