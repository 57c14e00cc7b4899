// ==========================================
// 分切/印刷机生产配置引擎 - 规范候选
// ==========================================
// 职责: 经过校验的目录候选 (由 engine::extraction 产出)
// 红线: 候选一旦产出即为只读快照, 不在会话间修改
// ==========================================

use serde::{Deserialize, Serialize};

/// 纸质母卷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BobineMerePapier {
    pub code: String,
    pub laize: f64,
    pub grammage: f64,
    pub couleur_papier: String,
}

/// 聚丙烯母卷 (只有宽度)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BobineMerePolypro {
    pub code: String,
    pub laize: f64,
}

/// 打孔方案的一组 (垫片, 环) 偏移
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaleBague {
    pub cale: Option<f64>,
    pub bague: Option<f64>,
}

/// 打孔方案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perfo {
    pub code: String,
    pub cales_bagues: Vec<CaleBague>,
}

/// 分切方案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refente {
    pub code: String,
    pub code_perfo: Option<String>,
    /// 按位置排列的正条宽
    pub laizes: Vec<f64>,
    pub chute: Option<f64>,
    pub laize_totale: f64,
}

impl Refente {
    pub fn nombre_laizes(&self) -> usize {
        self.laizes.len()
    }
}

/// 颜色约束: 颜色列表 + 顺序是否敏感
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExigenceCouleur {
    pub couleurs: Vec<String>,
    pub ordre_important: bool,
}

impl ExigenceCouleur {
    pub fn ordonnee<S: Into<String>>(couleurs: impl IntoIterator<Item = S>) -> Self {
        Self {
            couleurs: couleurs.into_iter().map(Into::into).collect(),
            ordre_important: true,
        }
    }

    pub fn non_ordonnee<S: Into<String>>(couleurs: impl IntoIterator<Item = S>) -> Self {
        Self {
            couleurs: couleurs.into_iter().map(Into::into).collect(),
            ordre_important: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.couleurs.is_empty()
    }
}

// ==========================================
// BobineFilleClichePose - 子卷拼版变体
// ==========================================
// 一个 (子卷, 拼版数, 有序颜色, 无序颜色) 组合
// hash 是整个引擎的连接键: hash 相同的变体在条位上可互换
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BobineFilleClichePose {
    pub code: String,
    pub laize: f64,
    pub couleur_papier: String,
    pub grammage: f64,
    pub pose: u32,
    /// 来源印版; None 表示中性拼版 (POSE_NEUTRE)
    pub code_cliche: Option<String>,
    pub couleurs_ordonnees: Vec<String>,
    pub couleurs_non_ordonnees: Vec<String>,
    pub hash: String,
}

impl BobineFilleClichePose {
    pub fn is_pose_neutre(&self) -> bool {
        self.code_cliche.is_none()
    }

    pub fn ordre_important(&self) -> bool {
        !self.couleurs_ordonnees.is_empty()
    }

    /// 全部颜色 (有序或无序列表之一)
    pub fn couleurs(&self) -> &[String] {
        if self.ordre_important() {
            &self.couleurs_ordonnees
        } else {
            &self.couleurs_non_ordonnees
        }
    }

    pub fn exigence_couleur(&self) -> ExigenceCouleur {
        ExigenceCouleur {
            couleurs: self.couleurs().to_vec(),
            ordre_important: self.ordre_important(),
        }
    }
}
