// ==========================================
// 分切/印刷机生产配置引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、保存、快照/恢复
// 存储: JSON 文件 (默认位于系统配置目录)
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::config::error::{ConfigError, ConfigResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 默认配置目录名
pub const CONFIG_DIR_NAME: &str = "refente-engine";

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - path: 配置文件路径
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 使用默认位置 ({config_dir}/refente-engine/config.json)
    ///
    /// 系统没有配置目录时退回到当前目录
    pub fn from_default_location() -> Self {
        Self::new(Self::default_path().unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 加载配置
    ///
    /// # 返回
    /// - 文件不存在: 默认配置
    /// - 文件存在: 解析并校验后的配置
    pub fn load(&self) -> ConfigResult<EngineConfig> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "配置文件不存在, 使用默认配置");
            return Ok(EngineConfig::default());
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| ConfigError::FileReadError {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = self.parse(&raw)?;
        info!(
            path = %self.path.display(),
            nombre_encriers = config.nombre_encriers,
            mode_chute = %config.mode_chute,
            "配置加载完成"
        );
        Ok(config)
    }

    /// 保存配置 (先校验, 自动创建父目录)
    pub fn save(&self, config: &EngineConfig) -> ConfigResult<()> {
        config.validate()?;

        let write_error = |e: std::io::Error| ConfigError::FileWriteError {
            path: self.path.display().to_string(),
            message: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_error)?;
            }
        }

        let json = self.get_config_snapshot(config)?;
        fs::write(&self.path, json).map_err(write_error)?;
        info!(path = %self.path.display(), "配置已保存");
        Ok(())
    }

    /// 获取配置快照 (JSON 格式)
    ///
    /// # 用途
    /// - 记录一次生产配置所用的引擎参数
    pub fn get_config_snapshot(&self, config: &EngineConfig) -> ConfigResult<String> {
        serde_json::to_string_pretty(config).map_err(|e| ConfigError::ParseError {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 从快照恢复配置 (解析 + 校验, 不写文件)
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<EngineConfig> {
        self.parse(snapshot_json)
    }

    fn parse(&self, raw: &str) -> ConfigResult<EngineConfig> {
        let config: EngineConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::ParseError {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        if let Err(e) = config.validate() {
            warn!(path = %self.path.display(), error = %e, "配置校验失败");
            return Err(e);
        }
        Ok(config)
    }
}
