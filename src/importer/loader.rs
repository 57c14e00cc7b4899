// ==========================================
// 分切/印刷机生产配置引擎 - 目录装载
// ==========================================
// 职责: 数据源 → 原始行 → 规范目录 (一次完整快照)
// ==========================================

use crate::domain::types::ModeChute;
use crate::engine::catalogue::CatalogueCanonique;
use crate::importer::error::ImportResult;
use crate::importer::source::CatalogSource;
use std::time::Instant;
use tracing::{info, instrument};

impl CatalogueCanonique {
    /// 从数据源装载并抽取规范目录
    ///
    /// # 参数
    /// - source: 目录数据源
    /// - mode_chute: 分切总宽的废边算法
    #[instrument(skip(source))]
    pub async fn load(
        source: &dyn CatalogSource,
        mode_chute: ModeChute,
    ) -> ImportResult<CatalogueCanonique> {
        let debut = Instant::now();
        let raw = source.load_raw_catalogue().await?;
        let catalogue = CatalogueCanonique::from_rows(&raw, mode_chute);
        info!(
            elapsed_ms = debut.elapsed().as_millis() as u64,
            variantes = catalogue.statistiques.variantes,
            "目录装载完成"
        );
        Ok(catalogue)
    }
}
