// ==========================================
// 分切/印刷机生产配置引擎 - 引擎配置
// ==========================================
// 职责: 墨槽数量/重排/绑定墨槽、废边算法、母卷宽度容差
// 默认值: 见 Default 实现; 缺失字段按默认值补齐
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::candidate::ExigenceCouleur;
use crate::domain::types::ModeChute;
use crate::engine::ink_well::MAX_ENCRIERS;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 绑定专用墨的墨槽
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncrierFixe {
    /// 墨槽位置 (从 0 开始)
    pub position: usize,
    pub couleurs: Vec<String>,
    #[serde(default)]
    pub ordre_important: bool,
}

impl EncrierFixe {
    pub fn exigence(&self) -> ExigenceCouleur {
        ExigenceCouleur {
            couleurs: self.couleurs.clone(),
            ordre_important: self.ordre_important,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 印刷机墨槽数
    pub nombre_encriers: usize,

    /// 是否允许重排墨槽位置 (开启后穷举类别排列)
    pub reordonnancement_encriers: bool,

    /// 绑定专用墨的墨槽
    pub encriers_fixes: Vec<EncrierFixe>,

    /// 分切总宽的废边算法
    pub mode_chute: ModeChute,

    /// 母卷宽度可超出分切总宽的容差 (mm)
    pub tolerance_laize_mm: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            nombre_encriers: 6,
            reordonnancement_encriers: true,
            encriers_fixes: Vec::new(),
            mode_chute: ModeChute::Ajout,
            tolerance_laize_mm: 0.0,
        }
    }
}

impl EngineConfig {
    /// 校验配置取值范围
    ///
    /// # 规则
    /// - 1 <= nombre_encriers <= MAX_ENCRIERS
    /// - 绑定墨槽位置不越界、不重复、颜色非空
    /// - tolerance_laize_mm 为有限非负数
    pub fn validate(&self) -> ConfigResult<()> {
        if self.nombre_encriers == 0 || self.nombre_encriers > MAX_ENCRIERS {
            return Err(ConfigError::ValidationError {
                key: "nombre_encriers".to_string(),
                message: format!(
                    "取值 {} 超出范围 [1, {}]",
                    self.nombre_encriers, MAX_ENCRIERS
                ),
            });
        }

        let mut positions = HashSet::new();
        for fixe in &self.encriers_fixes {
            if fixe.position >= self.nombre_encriers {
                return Err(ConfigError::ValidationError {
                    key: "encriers_fixes".to_string(),
                    message: format!(
                        "墨槽位置 {} 越界 (墨槽数 {})",
                        fixe.position, self.nombre_encriers
                    ),
                });
            }
            if !positions.insert(fixe.position) {
                return Err(ConfigError::ValidationError {
                    key: "encriers_fixes".to_string(),
                    message: format!("墨槽位置 {} 重复绑定", fixe.position),
                });
            }
            if fixe.couleurs.iter().all(|c| c.trim().is_empty()) {
                return Err(ConfigError::ValidationError {
                    key: "encriers_fixes".to_string(),
                    message: format!("墨槽位置 {} 未指定颜色", fixe.position),
                });
            }
        }

        if !self.tolerance_laize_mm.is_finite() || self.tolerance_laize_mm < 0.0 {
            return Err(ConfigError::ValidationError {
                key: "tolerance_laize_mm".to_string(),
                message: format!("取值 {} 必须为非负数", self.tolerance_laize_mm),
            });
        }

        Ok(())
    }
}
