// ==========================================
// 分切/印刷机生产配置引擎 - 规范目录快照
// ==========================================
// 职责: 对一次原始目录快照执行全部抽取, 得到只读候选集合
// 红线: 快照建立后不再修改; 会话间通过 Arc 只读共享
// ==========================================

use crate::domain::candidate::{
    BobineFilleClichePose, BobineMerePapier, BobineMerePolypro, Perfo, Refente,
};
use crate::domain::catalog::RawCatalogue;
use crate::domain::types::ModeChute;
use crate::engine::extraction::{
    exclusion_reason_bobine_fille, exclusion_reason_bobine_mere, exclusion_reason_perfo,
    exclusion_reason_refente, extract_bobine_fille_variants, extract_bobine_mere_papier,
    extract_bobine_mere_polypro, extract_perfo, extract_refente,
};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// 单类目录的抽取统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComptageExtraction {
    /// 读取的原始行
    pub lues: usize,
    /// 产生至少一个候选的行
    pub retenues: usize,
    /// 被排除的行
    pub exclues: usize,
}

impl ComptageExtraction {
    fn compter(&mut self, retenue: bool) {
        self.lues += 1;
        if retenue {
            self.retenues += 1;
        } else {
            self.exclues += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatistiquesCatalogue {
    pub bobines_meres: ComptageExtraction,
    pub bobines_filles: ComptageExtraction,
    pub perfos: ComptageExtraction,
    pub refentes: ComptageExtraction,
    /// 产出的子卷变体总数
    pub variantes: usize,
}

// ==========================================
// CatalogueCanonique - 规范目录
// ==========================================
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogueCanonique {
    pub bobines_meres_papier: Vec<BobineMerePapier>,
    pub bobines_meres_polypro: Vec<BobineMerePolypro>,
    pub perfos: Vec<Perfo>,
    pub refentes: Vec<Refente>,
    pub bobines_filles: Vec<BobineFilleClichePose>,
    pub statistiques: StatistiquesCatalogue,
}

impl CatalogueCanonique {
    /// 对原始目录执行抽取
    ///
    /// # 参数
    /// - raw: 原始目录行
    /// - mode_chute: 分切总宽的废边算法
    #[instrument(skip(raw), fields(
        bobines_meres = raw.bobines_meres.len(),
        bobines_filles = raw.bobines_filles.len(),
        cliches = raw.cliches.len(),
        perfos = raw.perfos.len(),
        refentes = raw.refentes.len()
    ))]
    pub fn from_rows(raw: &RawCatalogue, mode_chute: ModeChute) -> Self {
        let mut catalogue = Self::default();
        let stats = &mut catalogue.statistiques;

        for row in &raw.bobines_meres {
            let papier = extract_bobine_mere_papier(row);
            let polypro = extract_bobine_mere_polypro(row);
            stats
                .bobines_meres
                .compter(papier.is_some() || polypro.is_some());
            if let Some(reason) = exclusion_reason_bobine_mere(row) {
                debug!(code = %row.code, %reason, "母卷排除");
            }
            catalogue.bobines_meres_papier.extend(papier);
            catalogue.bobines_meres_polypro.extend(polypro);
        }

        let cliches = raw.cliches_par_code();
        for row in &raw.bobines_filles {
            let variantes = extract_bobine_fille_variants(row, &cliches);
            stats.bobines_filles.compter(!variantes.is_empty());
            if let Some(reason) = exclusion_reason_bobine_fille(row) {
                debug!(code = %row.code, %reason, "子卷排除");
            }
            stats.variantes += variantes.len();
            catalogue.bobines_filles.extend(variantes);
        }

        for row in &raw.perfos {
            let perfo = extract_perfo(row);
            stats.perfos.compter(perfo.is_some());
            if let Some(reason) = exclusion_reason_perfo(row) {
                debug!(code = %row.code, %reason, "打孔方案排除");
            }
            catalogue.perfos.extend(perfo);
        }

        for row in &raw.refentes {
            let refente = extract_refente(row, mode_chute);
            stats.refentes.compter(refente.is_some());
            if let Some(reason) = exclusion_reason_refente(row) {
                debug!(code = %row.code, %reason, "分切方案排除");
            }
            catalogue.refentes.extend(refente);
        }

        info!(
            papier = catalogue.bobines_meres_papier.len(),
            polypro = catalogue.bobines_meres_polypro.len(),
            perfos = catalogue.perfos.len(),
            refentes = catalogue.refentes.len(),
            variantes = catalogue.bobines_filles.len(),
            "规范目录已建立"
        );
        catalogue
    }

    pub fn find_perfo(&self, code: &str) -> Option<&Perfo> {
        self.perfos.iter().find(|p| p.code == code)
    }

    pub fn find_refente(&self, code: &str) -> Option<&Refente> {
        self.refentes.iter().find(|r| r.code == code)
    }

    pub fn find_bobine_mere_papier(&self, code: &str) -> Option<&BobineMerePapier> {
        self.bobines_meres_papier.iter().find(|m| m.code == code)
    }

    pub fn find_bobine_mere_polypro(&self, code: &str) -> Option<&BobineMerePolypro> {
        self.bobines_meres_polypro.iter().find(|m| m.code == code)
    }

    /// 某子卷在某拼版数下的全部变体 (两个印版可能给出不同颜色)
    pub fn variantes<'a>(
        &'a self,
        code: &'a str,
        pose: u32,
    ) -> impl Iterator<Item = &'a BobineFilleClichePose> + 'a {
        self.bobines_filles
            .iter()
            .filter(move |v| v.code == code && v.pose == pose)
    }
}
