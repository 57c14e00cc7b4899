// ==========================================
// 分切/印刷机生产配置引擎 - 引擎层
// ==========================================
// 职责: 多重集代数、规范抽取、墨槽分配、条位排布、选择收敛
// 红线: 引擎为纯函数, 不做 I/O; 目录与配置只读借用
// ==========================================

pub mod catalogue;
pub mod error;
pub mod extraction;
pub mod ink_well;
pub mod lane_fit;
pub mod multiset;
pub mod selection;

// 重导出核心引擎
pub use catalogue::{CatalogueCanonique, ComptageExtraction, StatistiquesCatalogue};
pub use error::{EncrierError, EngineError, EngineResult, IncoherencePlan};
pub use ink_well::{
    affecter_encriers, est_faisable, AffectationEncriers, ClasseCouleur, PressInkWells,
    MAX_ENCRIERS,
};
pub use lane_fit::{placer_blocs, BlocLaize, PlacementLaizes};
pub use multiset::Multiset;
pub use selection::SelectionEngine;
