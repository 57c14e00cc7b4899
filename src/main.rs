// ==========================================
// 分切/印刷机生产配置引擎 - 命令行入口
// ==========================================
// 用法: refente-engine <目录CSV文件夹> [config.json]
// 输出: 空计划下的初始 Selectables (JSON)
// ==========================================

use anyhow::{bail, Context, Result};
use refente_engine::importer::CsvCatalogSource;
use refente_engine::{logging, AppState, CatalogueCanonique, ConfigManager};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    logging::init();

    let mut args = std::env::args().skip(1);
    let Some(catalogue_dir) = args.next() else {
        bail!("用法: refente-engine <目录CSV文件夹> [config.json]");
    };

    tracing::info!("==================================================");
    tracing::info!("{}", refente_engine::APP_NAME);
    tracing::info!("系统版本: {}", refente_engine::VERSION);
    tracing::info!("==================================================");

    let config_manager = match args.next() {
        Some(path) => ConfigManager::new(path),
        None => ConfigManager::from_default_location(),
    };
    let config = config_manager
        .load()
        .with_context(|| format!("无法加载配置: {}", config_manager.path().display()))?;

    let source = CsvCatalogSource::new(&catalogue_dir);
    let catalogue = CatalogueCanonique::load(&source, config.mode_chute)
        .await
        .map_err(|e| anyhow::anyhow!(e.libelle()))
        .with_context(|| format!("无法装载目录: {}", catalogue_dir))?;

    let state = AppState::new(config, catalogue);
    let session = state.ouvrir_session();
    tracing::info!(session_id = %session.id(), "初始选择已计算");

    let selectables = session.selectables();
    println!("{}", serde_json::to_string_pretty(&selectables)?);
    Ok(())
}
