// ==========================================
// 分切/印刷机生产配置引擎 - 生产计划 (编辑中)
// ==========================================
// 职责: 一个编辑会话独占的部分选择
// 红线: 无全局 "当前计划", 计划作为显式状态传入引擎
// ==========================================

use crate::domain::candidate::{
    BobineFilleClichePose, BobineMerePapier, BobineMerePolypro, ExigenceCouleur, Perfo, Refente,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanProduction {
    pub bobine_mere_papier: Option<BobineMerePapier>,
    pub bobine_mere_polypro: Option<BobineMerePolypro>,
    pub perfo: Option<Perfo>,
    pub refente: Option<Refente>,
    /// 已选子卷变体 (按添加顺序)
    pub bobines_filles: Vec<BobineFilleClichePose>,
}

impl PlanProduction {
    pub fn new() -> Self {
        Self::default()
    }

    /// 没有任何已固定的选择
    pub fn is_empty(&self) -> bool {
        self.bobine_mere_papier.is_none()
            && self.bobine_mere_polypro.is_none()
            && self.perfo.is_none()
            && self.refente.is_none()
            && self.bobines_filles.is_empty()
    }

    /// 已选子卷的颜色约束 (按添加顺序)
    pub fn exigences_couleur(&self) -> Vec<ExigenceCouleur> {
        self.bobines_filles
            .iter()
            .map(BobineFilleClichePose::exigence_couleur)
            .collect()
    }

    /// 已选子卷占用的条数
    pub fn nombre_poses(&self) -> u32 {
        self.bobines_filles.iter().map(|v| v.pose).sum()
    }
}
