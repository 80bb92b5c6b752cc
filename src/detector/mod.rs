//! 检测模块：识别流程编排、启发式规则与识别结果
pub mod global;
pub mod heuristics;
pub mod registry;
pub mod result;
pub mod detector;

// 导出核心接口
pub use self::global::{
    detect_user_agent, init_device_detector, init_device_detector_with_options,
    init_device_detector_with_rules,
};
pub use self::detector::DeviceDetector;
pub use self::registry::ClientTypeRegistry;
pub use self::result::DetectResult;
