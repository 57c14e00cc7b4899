// ==========================================
// 集成测试辅助模块
// ==========================================

#![allow(dead_code)]

pub mod test_data_builder;

use refente_engine::{CatalogueCanonique, EngineConfig, ModeChute};

pub use test_data_builder::*;

/// 标准测试目录的规范快照
pub fn catalogue_canonique() -> CatalogueCanonique {
    refente_engine::logging::init_test();
    CatalogueCanonique::from_rows(&catalogue_standard(), ModeChute::Ajout)
}

/// 指定墨槽数的配置 (允许重排)
pub fn config_encriers(nombre_encriers: usize) -> EngineConfig {
    EngineConfig {
        nombre_encriers,
        ..Default::default()
    }
}
