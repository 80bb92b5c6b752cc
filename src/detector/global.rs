//! 全局检测器单例管理
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::detector::DeviceDetector;
use super::result::DetectResult;
use crate::config::{DetectorOptions, GlobalConfig};
use crate::error::{DdResult, DeviceDetectorError};
use crate::rule::model::RuleLibrary;

/// 全局检测器实例
static GLOBAL_DETECTOR: Lazy<Arc<OnceCell<DeviceDetector>>> = Lazy::new(|| {
    Arc::new(OnceCell::new())
});

/// 按配置加载规则并初始化全局检测器（默认检测选项）
pub async fn init_device_detector(config: GlobalConfig) -> DdResult<()> {
    init_device_detector_with_options(config, DetectorOptions::default()).await
}

/// 带自定义配置与检测选项初始化全局检测器，重复初始化直接返回
pub async fn init_device_detector_with_options(config: GlobalConfig, options: DetectorOptions) -> DdResult<()> {
    GLOBAL_DETECTOR
        .get_or_try_init(|| DeviceDetector::new(&config, options))
        .await?;
    Ok(())
}

/// 基于已加载的规则库初始化全局检测器（不读取文件）
pub fn init_device_detector_with_rules(rule_lib: &RuleLibrary, options: DetectorOptions) -> DdResult<()> {
    if GLOBAL_DETECTOR.get().is_some() {
        return Ok(());
    }

    let detector = DeviceDetector::with_rules(rule_lib, options)?;
    // 并发初始化时以先完成者为准
    let _ = GLOBAL_DETECTOR.set(detector);
    Ok(())
}

/// 获取全局检测器
pub(crate) fn get_global_detector() -> DdResult<&'static DeviceDetector> {
    GLOBAL_DETECTOR.get()
        .ok_or(DeviceDetectorError::DetectorNotInitialized)
}

/// 使用全局检测器识别 UA
pub fn detect_user_agent(user_agent: &str) -> DdResult<DetectResult> {
    let detector = get_global_detector()?;
    Ok(detector.detect(user_agent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::MemoryPatternCache;
    use crate::rule::model::RawRule;

    #[test]
    fn global_detector_after_init() {
        let mut lib = RuleLibrary::default();
        lib.oss.rules.push(RawRule::named("Android[ /]?([\\d\\.]+)?", "Android").with_version("$1"));
        let options = DetectorOptions::default().with_cache(Arc::new(MemoryPatternCache::new()));

        init_device_detector_with_rules(&lib, options.clone()).unwrap();
        // 重复初始化不报错
        init_device_detector_with_rules(&lib, options).unwrap();

        let result = detect_user_agent("Mozilla/5.0 (Linux; Android 1.6)").unwrap();
        assert_eq!(result.os.short_name, "AND");
        assert_eq!(result.os.version, "1.6");
    }
}
