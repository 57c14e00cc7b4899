// ==========================================
// 分切/印刷机生产配置引擎 - 可选项快照
// ==========================================
// 职责: 每次计划变更后重算的五维候选集合
// 说明: 无独立身份, 永远是 (计划 + 目录 + 配置) 的纯函数结果
// ==========================================

use crate::domain::candidate::{
    BobineFilleClichePose, BobineMerePapier, BobineMerePolypro, Perfo, Refente,
};
use crate::domain::types::Dimension;
use serde::Serialize;

/// 子卷候选
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidatBobineFille {
    pub variante: BobineFilleClichePose,
    /// 颜色已被当前计划覆盖, 无需新墨
    pub reutilise_encriers: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selectables {
    pub bobines_meres_papier: Vec<BobineMerePapier>,
    pub bobines_meres_polypro: Vec<BobineMerePolypro>,
    pub perfos: Vec<Perfo>,
    pub refentes: Vec<Refente>,
    pub bobines_filles: Vec<CandidatBobineFille>,
}

impl Selectables {
    /// 全部维度为空 (不一致计划的结果)
    pub fn vide() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bobines_meres_papier.is_empty()
            && self.bobines_meres_polypro.is_empty()
            && self.perfos.is_empty()
            && self.refentes.is_empty()
            && self.bobines_filles.is_empty()
    }

    pub fn count(&self, dimension: Dimension) -> usize {
        match dimension {
            Dimension::BobineMerePapier => self.bobines_meres_papier.len(),
            Dimension::BobineMerePolypro => self.bobines_meres_polypro.len(),
            Dimension::Perfo => self.perfos.len(),
            Dimension::Refente => self.refentes.len(),
            Dimension::BobineFille => self.bobines_filles.len(),
        }
    }

    pub fn contient_perfo(&self, code: &str) -> bool {
        self.perfos.iter().any(|p| p.code == code)
    }

    pub fn contient_refente(&self, code: &str) -> bool {
        self.refentes.iter().any(|r| r.code == code)
    }

    pub fn contient_bobine_mere_papier(&self, code: &str) -> bool {
        self.bobines_meres_papier.iter().any(|m| m.code == code)
    }

    pub fn contient_bobine_mere_polypro(&self, code: &str) -> bool {
        self.bobines_meres_polypro.iter().any(|m| m.code == code)
    }

    pub fn contient_bobine_fille(&self, code: &str, pose: u32) -> bool {
        self.bobines_filles
            .iter()
            .any(|c| c.variante.code == code && c.variante.pose == pose)
    }
}
