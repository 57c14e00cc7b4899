// ==========================================
// 分切/印刷机生产配置引擎 - 选择收敛引擎
// ==========================================
// 职责: 由 (目录 + 部分计划) 计算每个维度仍可选的候选 (Selectables)
// 红线: 纯函数, 幂等, 无 I/O; 重复调用结果相同
// 红线: 不一致的计划以 "空" 表达, 不抛错
// ==========================================
// 做法: 分切方案是枢纽。某维度的候选保留, 当且仅当存在一个分切方案
//       同时兼容该候选与其余全部已固定选择。
//       空计划同样适用: 没有任何分切方案能承载的候选不返回。
// ==========================================

use crate::config::EngineConfig;
use crate::domain::candidate::{
    BobineFilleClichePose, BobineMerePapier, BobineMerePolypro, ExigenceCouleur, Perfo, Refente,
};
use crate::domain::plan::PlanProduction;
use crate::domain::selectables::{CandidatBobineFille, Selectables};
use crate::domain::types::Dimension;
use crate::engine::catalogue::CatalogueCanonique;
use crate::engine::error::IncoherencePlan;
use crate::engine::ink_well::{affecter_encriers, PressInkWells};
use crate::engine::lane_fit::{blocs_compatibles, laizes_egales, BlocLaize, EPSILON_LAIZE};
use crate::engine::multiset::Multiset;
use std::collections::HashMap;
use tracing::{instrument, warn};

// ==========================================
// 兼容性谓词
// ==========================================

/// 母卷宽度与分切总宽兼容: total <= laize_mere <= total + tolerance
pub fn laize_mere_compatible(laize_mere: f64, refente: &Refente, tolerance_mm: f64) -> bool {
    laize_mere + EPSILON_LAIZE >= refente.laize_totale
        && laize_mere <= refente.laize_totale + tolerance_mm + EPSILON_LAIZE
}

/// 纸质母卷与子卷的纸色、克重一致
pub fn papier_compatible(mere: &BobineMerePapier, variante: &BobineFilleClichePose) -> bool {
    mere.couleur_papier == variante.couleur_papier && laizes_egales(mere.grammage, variante.grammage)
}

/// 子卷颜色多重集: 每种颜色按占用条数计数
pub fn multiset_couleurs(variante: &BobineFilleClichePose) -> Multiset<String> {
    let mut multiset = Multiset::new();
    for couleur in variante.couleurs() {
        multiset.insert_n(couleur.clone(), variante.pose as usize);
    }
    multiset
}

/// 计划中全部子卷的颜色多重集之并
pub fn multiset_plan(plan: &PlanProduction) -> Multiset<String> {
    plan.bobines_filles
        .iter()
        .fold(Multiset::new(), |acc, v| acc.union(&multiset_couleurs(v)))
}

fn blocs_plan(plan: &PlanProduction) -> Vec<BlocLaize> {
    plan.bobines_filles.iter().map(BlocLaize::from).collect()
}

// ==========================================
// SelectionEngine - 选择收敛引擎
// ==========================================
pub struct SelectionEngine<'a> {
    catalogue: &'a CatalogueCanonique,
    config: &'a EngineConfig,
    press: PressInkWells,
}

impl<'a> SelectionEngine<'a> {
    /// 创建引擎 (借用只读目录与配置)
    pub fn new(catalogue: &'a CatalogueCanonique, config: &'a EngineConfig) -> Self {
        Self {
            catalogue,
            config,
            press: PressInkWells::from_config(config),
        }
    }

    pub fn press(&self) -> &PressInkWells {
        &self.press
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算 Selectables
    ///
    /// # 规则
    /// 1. 已固定选择互相矛盾, 或没有分切方案能承载 → 全部维度为空
    /// 2. 母卷: 纸色/克重与已选子卷一致, 且有兼容分切方案匹配其宽度
    /// 3. 打孔方案: 至少一个兼容分切方案引用它
    /// 4. 分切方案: 兼容除自身外的全部已固定选择
    /// 5. 子卷: 条位可排 + 墨槽可行; 颜色已被覆盖的候选标记复用并排在前面
    #[instrument(skip(self, plan), fields(
        plan_vide = plan.is_empty(),
        bobines_filles = plan.bobines_filles.len()
    ))]
    pub fn selectables(&self, plan: &PlanProduction) -> Selectables {
        if let Err(incoherence) = self.verifier_coherence(plan) {
            warn!(%incoherence, "计划已固定的选择互相矛盾, 返回空 Selectables");
            return Selectables::vide();
        }

        Selectables {
            bobines_meres_papier: self.bobines_meres_papier(plan),
            bobines_meres_polypro: self.bobines_meres_polypro(plan),
            perfos: self.perfos(plan),
            refentes: self.refentes(plan),
            bobines_filles: self.bobines_filles(plan),
        }
    }

    /// 检查计划中已固定的选择是否互相一致
    pub fn verifier_coherence(&self, plan: &PlanProduction) -> Result<(), IncoherencePlan> {
        if let Some(refente) = &plan.refente {
            if let Some(perfo) = &plan.perfo {
                if refente.code_perfo.as_deref() != Some(perfo.code.as_str()) {
                    return Err(IncoherencePlan::PerfoRefente {
                        perfo: perfo.code.clone(),
                        refente: refente.code.clone(),
                    });
                }
            }

            let meres = plan
                .bobine_mere_papier
                .as_ref()
                .map(|m| (m.code.as_str(), m.laize))
                .into_iter()
                .chain(
                    plan.bobine_mere_polypro
                        .as_ref()
                        .map(|m| (m.code.as_str(), m.laize)),
                );
            for (code, laize) in meres {
                if !laize_mere_compatible(laize, refente, self.config.tolerance_laize_mm) {
                    return Err(IncoherencePlan::LaizeMere {
                        bobine: code.to_string(),
                        laize,
                        laize_totale: refente.laize_totale,
                    });
                }
            }

            if !blocs_compatibles(&refente.laizes, &blocs_plan(plan)) {
                return Err(IncoherencePlan::Laizes {
                    refente: refente.code.clone(),
                });
            }
        } else if !plan.is_empty() && self.refentes_compatibles(plan, None).is_empty() {
            return Err(IncoherencePlan::SansRefente);
        }

        if let Some(mere) = &plan.bobine_mere_papier {
            if let Some(v) = plan
                .bobines_filles
                .iter()
                .find(|v| !papier_compatible(mere, v))
            {
                return Err(IncoherencePlan::Papier {
                    bobine: mere.code.clone(),
                    bobine_fille: v.code.clone(),
                });
            }
        }

        affecter_encriers(&plan.exigences_couleur(), &self.press)?;
        Ok(())
    }

    /// 与除 `ignore` 外全部已固定选择兼容的分切方案
    pub fn refentes_compatibles(
        &self,
        plan: &PlanProduction,
        ignore: Option<Dimension>,
    ) -> Vec<&'a Refente> {
        let blocs = blocs_plan(plan);
        let catalogue: &'a CatalogueCanonique = self.catalogue;
        catalogue
            .refentes
            .iter()
            .filter(|r| self.refente_compatible(plan, r, ignore, &blocs))
            .collect()
    }

    fn refente_compatible(
        &self,
        plan: &PlanProduction,
        refente: &Refente,
        ignore: Option<Dimension>,
        blocs: &[BlocLaize],
    ) -> bool {
        let pris_en_compte = |dimension: Dimension| ignore != Some(dimension);
        let tolerance = self.config.tolerance_laize_mm;

        if pris_en_compte(Dimension::Refente) {
            if let Some(fixe) = &plan.refente {
                if fixe.code != refente.code {
                    return false;
                }
            }
        }
        if pris_en_compte(Dimension::Perfo) {
            if let Some(perfo) = &plan.perfo {
                if refente.code_perfo.as_deref() != Some(perfo.code.as_str()) {
                    return false;
                }
            }
        }
        if pris_en_compte(Dimension::BobineMerePapier) {
            if let Some(mere) = &plan.bobine_mere_papier {
                if !laize_mere_compatible(mere.laize, refente, tolerance) {
                    return false;
                }
            }
        }
        if pris_en_compte(Dimension::BobineMerePolypro) {
            if let Some(mere) = &plan.bobine_mere_polypro {
                if !laize_mere_compatible(mere.laize, refente, tolerance) {
                    return false;
                }
            }
        }
        if pris_en_compte(Dimension::BobineFille)
            && !blocs.is_empty()
            && !blocs_compatibles(&refente.laizes, blocs)
        {
            return false;
        }
        true
    }

    // ==========================================
    // 各维度候选
    // ==========================================

    fn bobines_meres_papier(&self, plan: &PlanProduction) -> Vec<BobineMerePapier> {
        let supports = self.refentes_compatibles(plan, Some(Dimension::BobineMerePapier));
        let tolerance = self.config.tolerance_laize_mm;

        self.catalogue
            .bobines_meres_papier
            .iter()
            .filter(|m| plan.bobines_filles.iter().all(|v| papier_compatible(m, v)))
            .filter(|m| {
                supports
                    .iter()
                    .any(|r| laize_mere_compatible(m.laize, r, tolerance))
            })
            .cloned()
            .collect()
    }

    fn bobines_meres_polypro(&self, plan: &PlanProduction) -> Vec<BobineMerePolypro> {
        let supports = self.refentes_compatibles(plan, Some(Dimension::BobineMerePolypro));
        let tolerance = self.config.tolerance_laize_mm;

        self.catalogue
            .bobines_meres_polypro
            .iter()
            .filter(|m| {
                supports
                    .iter()
                    .any(|r| laize_mere_compatible(m.laize, r, tolerance))
            })
            .cloned()
            .collect()
    }

    fn perfos(&self, plan: &PlanProduction) -> Vec<Perfo> {
        let supports = self.refentes_compatibles(plan, Some(Dimension::Perfo));
        self.catalogue
            .perfos
            .iter()
            .filter(|p| {
                supports
                    .iter()
                    .any(|r| r.code_perfo.as_deref() == Some(p.code.as_str()))
            })
            .cloned()
            .collect()
    }

    fn refentes(&self, plan: &PlanProduction) -> Vec<Refente> {
        self.refentes_compatibles(plan, Some(Dimension::Refente))
            .into_iter()
            .cloned()
            .collect()
    }

    fn bobines_filles(&self, plan: &PlanProduction) -> Vec<CandidatBobineFille> {
        let supports = self.refentes_compatibles(plan, None);
        let mut blocs = blocs_plan(plan);
        let mut exigences: Vec<ExigenceCouleur> = plan.exigences_couleur();
        let couverture = multiset_plan(plan);

        // hash 覆盖宽度/拼版数/颜色, 即条位与墨槽判定的全部输入
        let mut memo: HashMap<&str, bool> = HashMap::new();

        let mut candidats: Vec<CandidatBobineFille> = Vec::new();
        for variante in &self.catalogue.bobines_filles {
            if let Some(mere) = &plan.bobine_mere_papier {
                if !papier_compatible(mere, variante) {
                    continue;
                }
            }

            let retenue = *memo.entry(variante.hash.as_str()).or_insert_with(|| {
                blocs.push(BlocLaize::from(variante));
                let laizes_ok = supports
                    .iter()
                    .any(|r| blocs_compatibles(&r.laizes, &blocs));
                blocs.pop();
                if !laizes_ok {
                    return false;
                }

                exigences.push(variante.exigence_couleur());
                let encriers_ok = affecter_encriers(&exigences, &self.press).is_ok();
                exigences.pop();
                encriers_ok
            });

            if retenue {
                candidats.push(CandidatBobineFille {
                    variante: variante.clone(),
                    reutilise_encriers: multiset_couleurs(variante).is_subset_of(&couverture),
                });
            }
        }

        // 复用墨槽的候选优先 (稳定排序, 保持目录顺序)
        candidats.sort_by_key(|c| !c.reutilise_encriers);
        candidats
    }
}
