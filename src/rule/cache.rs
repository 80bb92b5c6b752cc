//! 规则快照缓存管理
//! 仅处理规则库的本地序列化（MessagePack）和反序列化

use rmp_serde::{Serializer, from_slice};
use serde::Serialize;
use tracing::debug;

use super::model::RuleLibrary;
use crate::error::{DdResult, DeviceDetectorError};
use crate::config::GlobalConfig;

/// 规则快照管理器
pub struct RuleCacheManager;

impl RuleCacheManager {
    /// 从本地快照加载规则库
    pub async fn load_from_cache(config: &GlobalConfig) -> DdResult<RuleLibrary> {
        let cache_data = tokio::fs::read(&config.rule_cache_path).await.map_err(|e| {
            DeviceDetectorError::RuleCacheError(format!(
                "读取规则快照 {} 失败：{}",
                config.rule_cache_path.display(),
                e
            ))
        })?;
        let rule_lib = Self::decode(&cache_data)?;

        debug!("规则快照反序列化成功，规则总数：{}", rule_lib.rule_count());
        Ok(rule_lib)
    }

    /// 将规则库写入本地快照
    pub async fn save_to_cache(config: &GlobalConfig, rule_lib: &RuleLibrary) -> DdResult<()> {
        let cache_data = Self::encode(rule_lib)?;
        debug!("规则库序列化成功，序列化后数据大小：{} 字节", cache_data.len());

        tokio::fs::write(&config.rule_cache_path, cache_data).await.map_err(|e| {
            DeviceDetectorError::RuleCacheError(format!(
                "写入规则快照 {} 失败：{}",
                config.rule_cache_path.display(),
                e
            ))
        })?;
        Ok(())
    }

    /// 清除本地快照
    pub async fn clear_cache(config: &GlobalConfig) -> DdResult<()> {
        if tokio::fs::try_exists(&config.rule_cache_path).await? {
            tokio::fs::remove_file(&config.rule_cache_path).await?;
        }
        Ok(())
    }

    pub fn encode(rule_lib: &RuleLibrary) -> DdResult<Vec<u8>> {
        let mut buf = Vec::new();
        rule_lib
            .serialize(&mut Serializer::new(&mut buf).with_struct_map())
            .map_err(|e| DeviceDetectorError::MsgPackError(format!("序列化失败：{}", e)))?;
        Ok(buf)
    }

    pub fn decode(data: &[u8]) -> DdResult<RuleLibrary> {
        from_slice(data).map_err(|e| DeviceDetectorError::MsgPackError(format!("反序列化失败：{}", e)))
    }
}
