// ==========================================
// 分切/印刷机生产配置引擎 - 应用状态
// ==========================================
// 职责: 管理进程级共享状态 (引擎配置 + 当前目录快照)
// 红线: 目录快照只读; 替换快照不影响已打开会话
// ==========================================

use crate::app::session::SessionEdition;
use crate::config::EngineConfig;
use crate::engine::catalogue::CatalogueCanonique;
use crate::importer::error::ImportResult;
use crate::importer::source::CatalogSource;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// 应用状态
///
/// 多个编辑会话可并发打开, 各自独占计划, 共享同一目录快照
pub struct AppState {
    /// 引擎配置
    config: Arc<EngineConfig>,

    /// 当前目录快照
    catalogue: RwLock<Arc<CatalogueCanonique>>,
}

impl AppState {
    pub fn new(config: EngineConfig, catalogue: CatalogueCanonique) -> Self {
        Self {
            config: Arc::new(config),
            catalogue: RwLock::new(Arc::new(catalogue)),
        }
    }

    pub fn config(&self) -> Arc<EngineConfig> {
        Arc::clone(&self.config)
    }

    /// 当前目录快照
    pub fn catalogue(&self) -> Arc<CatalogueCanonique> {
        let guard = self
            .catalogue
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// 打开新的编辑会话 (绑定当前快照)
    pub fn ouvrir_session(&self) -> SessionEdition {
        SessionEdition::new(self.catalogue(), self.config())
    }

    /// 替换目录快照, 返回旧快照
    pub fn remplacer_catalogue(&self, catalogue: CatalogueCanonique) -> Arc<CatalogueCanonique> {
        let mut guard = self
            .catalogue
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let variantes = catalogue.statistiques.variantes;
        let ancien = std::mem::replace(&mut *guard, Arc::new(catalogue));
        info!(variantes, "目录快照已替换");
        ancien
    }

    /// 从数据源重新装载目录并替换快照
    pub async fn recharger(&self, source: &dyn CatalogSource) -> ImportResult<Arc<CatalogueCanonique>> {
        let catalogue = CatalogueCanonique::load(source, self.config.mode_chute).await?;
        self.remplacer_catalogue(catalogue);
        Ok(self.catalogue())
    }
}
