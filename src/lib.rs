// ==========================================
// 分切/印刷机生产配置引擎 - 核心库
// ==========================================
// 系统定位: 组合可行性判定 + 选择收敛 (人工最终选择权)
// 数据流: 原始目录行 → 规范候选 → 墨槽/多重集校验 → Selectables
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 原始行、规范候选、生产计划
pub mod domain;

// 引擎层 - 纯函数组合逻辑
pub mod engine;

// 导入层 - 目录数据源
pub mod importer;

// 配置层 - 引擎配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 应用层 - 编辑会话与共享目录快照
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Dimension, ModeChute, RaisonExclusion};

// 领域实体
pub use domain::{
    BobineFilleClichePose, BobineMerePapier, BobineMerePolypro, CandidatBobineFille,
    ExigenceCouleur, Perfo, PlanProduction, Refente, Selectables,
};

// 引擎
pub use engine::{
    AffectationEncriers, CatalogueCanonique, EncrierError, EngineError, Multiset,
    PressInkWells, SelectionEngine,
};

// 配置
pub use config::{ConfigManager, EngineConfig};

// 应用层
pub use app::{AppState, SessionEdition, SessionError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "分切印刷生产配置引擎";
