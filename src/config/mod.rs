// ==========================================
// 分切/印刷机生产配置引擎 - 配置层
// ==========================================
// 职责: 引擎配置定义、加载与校验
// 存储: JSON 文件
// ==========================================

pub mod config_manager;
pub mod engine_config;
pub mod error;

// 重导出核心配置
pub use config_manager::ConfigManager;
pub use engine_config::{EncrierFixe, EngineConfig};
pub use error::{ConfigError, ConfigResult};
