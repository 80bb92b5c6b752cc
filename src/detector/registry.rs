//! 客户端类型注册表
//! 记录当前检测器解析链能产出的客户端类型

use crate::parser::ClientParserChain;
use crate::rule::record::ClientType;

/// 客户端类型注册表（按注册顺序，去重）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientTypeRegistry {
    types: Vec<ClientType>,
}

impl ClientTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从客户端解析链收集类型
    pub fn from_chain(chain: &ClientParserChain) -> Self {
        let mut registry = Self::new();
        for client_type in chain.client_types() {
            registry.register(client_type);
        }
        registry
    }

    /// 注册类型，已存在时返回 false
    pub fn register(&mut self, client_type: ClientType) -> bool {
        if self.contains(client_type) {
            return false;
        }
        self.types.push(client_type);
        true
    }

    pub fn contains(&self, client_type: ClientType) -> bool {
        self.types.contains(&client_type)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.types.iter().map(|t| t.label()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = ClientType> + '_ {
        self.types.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::compiler::MemoryPatternCache;
    use crate::parser::ClientParserKind;
    use crate::rule::model::RuleLibrary;

    #[test]
    fn registry_follows_chain_order() {
        let chain = ClientParserChain::from_kinds(
            &[ClientParserKind::Browser, ClientParserKind::Pim, ClientParserKind::Browser],
            &RuleLibrary::default(),
            Arc::new(MemoryPatternCache::new()),
        );
        let registry = ClientTypeRegistry::from_chain(&chain);
        assert_eq!(registry.names(), vec!["browser", "pim"]);
        assert!(registry.contains(ClientType::Pim));
        assert!(!registry.contains(ClientType::FeedReader));
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = ClientTypeRegistry::new();
        assert!(registry.register(ClientType::MediaPlayer));
        assert!(!registry.register(ClientType::MediaPlayer));
        assert_eq!(registry.len(), 1);
    }
}
