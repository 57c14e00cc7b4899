// ==========================================
// 分切/印刷机生产配置引擎 - 领域类型定义
// ==========================================
// 职责: 选择维度、废边模式、排除原因及目录常量
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 目录常量
// ==========================================

/// 聚丙烯母卷的纸色哨兵值
pub const COULEUR_POLYPRO: &str = "POLYPRO";

/// 纸色 "ECRU ENDUIT" 归一为 "ECRU"
pub const COULEUR_ECRU_ENDUIT: &str = "ECRU ENDUIT";
pub const COULEUR_ECRU: &str = "ECRU";

/// 无印版子卷的中性拼版数 (1..=7)
pub const NOMBRE_POSES_NEUTRES: u32 = 7;

/// 每个子卷最多关联的印版数
pub const MAX_CLICHES_PAR_BOBINE: usize = 2;

/// 每个印版最多的拼版数字段
pub const MAX_POSES_CLICHE: usize = 4;

/// 每个印版最多的颜色字段
pub const MAX_COULEURS_CLICHE: usize = 6;

/// 每个分切方案最多的条宽字段
pub const MAX_LAIZES_REFENTE: usize = 7;

/// 每个打孔方案最多的 (垫片, 环) 对
pub const MAX_CALES_PERFO: usize = 7;

// ==========================================
// 选择维度 (Dimension)
// ==========================================
// Selectables 的五个候选维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    BobineMerePapier,  // 纸质母卷
    BobineMerePolypro, // 聚丙烯母卷
    Perfo,             // 打孔方案
    Refente,           // 分切方案
    BobineFille,       // 子卷 (拼版变体)
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::BobineMerePapier => write!(f, "BOBINE_MERE_PAPIER"),
            Dimension::BobineMerePolypro => write!(f, "BOBINE_MERE_POLYPRO"),
            Dimension::Perfo => write!(f, "PERFO"),
            Dimension::Refente => write!(f, "REFENTE"),
            Dimension::BobineFille => write!(f, "BOBINE_FILLE"),
        }
    }
}

// ==========================================
// 废边模式 (Mode Chute)
// ==========================================
// 分切总宽 = round(条宽之和) ± chute
// 历史数据中存在两种算法, 通过配置切换
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModeChute {
    #[default]
    Ajout, // 总宽加上废边
    Retrait, // 总宽减去废边
}

impl ModeChute {
    /// 将废边应用到已取整的条宽之和
    pub fn appliquer(self, somme_laizes: f64, chute: f64) -> f64 {
        match self {
            ModeChute::Ajout => somme_laizes + chute,
            ModeChute::Retrait => somme_laizes - chute,
        }
    }
}

impl fmt::Display for ModeChute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeChute::Ajout => write!(f, "AJOUT"),
            ModeChute::Retrait => write!(f, "RETRAIT"),
        }
    }
}

// ==========================================
// 排除原因 (Raison Exclusion)
// ==========================================
// 校验排除不是错误: 无效行只产生 "无候选", 原因仅用于调试与统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "champ", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RaisonExclusion {
    Sommeil,                     // 休眠行
    ChampManquant(&'static str), // 字段缺失
    ChampInvalide(&'static str), // 字段存在但无效
}

impl RaisonExclusion {
    /// 本地化描述 (供 UI 协作方展示)
    pub fn libelle(&self) -> String {
        match self {
            RaisonExclusion::Sommeil => crate::i18n::t("exclusion.sommeil"),
            RaisonExclusion::ChampManquant(champ) => {
                crate::i18n::t_with_args("exclusion.champ_manquant", &[("champ", *champ)])
            }
            RaisonExclusion::ChampInvalide(champ) => {
                crate::i18n::t_with_args("exclusion.champ_invalide", &[("champ", *champ)])
            }
        }
    }
}

impl fmt::Display for RaisonExclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaisonExclusion::Sommeil => write!(f, "SOMMEIL"),
            RaisonExclusion::ChampManquant(champ) => write!(f, "CHAMP_MANQUANT({})", champ),
            RaisonExclusion::ChampInvalide(champ) => write!(f, "CHAMP_INVALIDE({})", champ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_chute_appliquer() {
        assert_eq!(ModeChute::Ajout.appliquer(300.0, 12.0), 312.0);
        assert_eq!(ModeChute::Retrait.appliquer(300.0, 12.0), 288.0);
    }

    #[test]
    fn test_mode_chute_serde() {
        let json = serde_json::to_string(&ModeChute::Retrait).unwrap();
        assert_eq!(json, "\"RETRAIT\"");
        let mode: ModeChute = serde_json::from_str("\"AJOUT\"").unwrap();
        assert_eq!(mode, ModeChute::Ajout);
    }

    #[test]
    fn test_raison_exclusion_display() {
        assert_eq!(RaisonExclusion::Sommeil.to_string(), "SOMMEIL");
        assert_eq!(
            RaisonExclusion::ChampManquant("laize").to_string(),
            "CHAMP_MANQUANT(laize)"
        );
    }
}
