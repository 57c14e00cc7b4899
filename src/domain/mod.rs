// ==========================================
// 分切/印刷机生产配置引擎 - 领域模型层
// ==========================================
// 职责: 定义原始目录行、规范候选、生产计划与可选项快照
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod candidate;
pub mod catalog;
pub mod plan;
pub mod selectables;
pub mod types;

// 重导出核心类型
pub use candidate::{
    BobineFilleClichePose, BobineMerePapier, BobineMerePolypro, CaleBague, ExigenceCouleur,
    Perfo, Refente,
};
pub use catalog::{
    ClichesParCode, RawBobineFille, RawBobineMere, RawCatalogue, RawCliche, RawPerfo, RawRefente,
};
pub use plan::PlanProduction;
pub use selectables::{CandidatBobineFille, Selectables};
pub use types::{Dimension, ModeChute, RaisonExclusion};
