// ==========================================
// 分切/印刷机生产配置引擎 - 编辑会话
// ==========================================
// 职责: 一个操作员的计划编辑会话 (独占计划, 共享只读目录)
// 红线: 每次变更后 Selectables 由引擎重算, 会话不缓存
// 红线: 失败的变更不改动计划
// ==========================================

use crate::config::EngineConfig;
use crate::domain::candidate::BobineFilleClichePose;
use crate::domain::plan::PlanProduction;
use crate::domain::selectables::Selectables;
use crate::domain::types::Dimension;
use crate::engine::catalogue::CatalogueCanonique;
use crate::engine::error::{EncrierError, EngineError};
use crate::engine::ink_well::{affecter_encriers, AffectationEncriers};
use crate::engine::lane_fit::{placer_blocs, BlocLaize, PlacementLaizes};
use crate::engine::multiset::Multiset;
use crate::engine::selection::{multiset_couleurs, SelectionEngine};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("{dimension} 中不存在编码 {code}")]
    ReferenceInconnue { dimension: Dimension, code: String },

    #[error("子卷 {code} 没有拼版数为 {pose} 的变体")]
    VarianteInconnue { code: String, pose: u32 },

    #[error("计划中没有子卷 {code} (拼版数 {pose})")]
    NonSelectionnee { code: String, pose: u32 },

    #[error(transparent)]
    Infaisable(#[from] EncrierError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result 类型别名
pub type SessionResult<T> = Result<T, SessionError>;

fn multiset_emplacements(variante: &BobineFilleClichePose) -> Multiset<String> {
    let mut multiset = Multiset::new();
    multiset.insert_n(variante.hash.clone(), variante.pose as usize);
    multiset
}

// ==========================================
// SessionEdition - 编辑会话
// ==========================================
pub struct SessionEdition {
    id: Uuid,
    ouverte_le: DateTime<Utc>,
    catalogue: Arc<CatalogueCanonique>,
    config: Arc<EngineConfig>,
    plan: PlanProduction,
    /// 每条位的颜色需求
    couleurs: Multiset<String>,
    /// 已占用条位 (按变体 hash)
    emplacements: Multiset<String>,
}

impl SessionEdition {
    pub fn new(catalogue: Arc<CatalogueCanonique>, config: Arc<EngineConfig>) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            ouverte_le: Utc::now(),
            catalogue,
            config,
            plan: PlanProduction::new(),
            couleurs: Multiset::new(),
            emplacements: Multiset::new(),
        };
        info!(session_id = %session.id, "编辑会话已打开");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn ouverte_le(&self) -> DateTime<Utc> {
        self.ouverte_le
    }

    pub fn plan(&self) -> &PlanProduction {
        &self.plan
    }

    pub fn catalogue(&self) -> &CatalogueCanonique {
        &self.catalogue
    }

    pub fn couleurs(&self) -> &Multiset<String> {
        &self.couleurs
    }

    pub fn emplacements(&self) -> &Multiset<String> {
        &self.emplacements
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 按当前计划重算 Selectables
    pub fn selectables(&self) -> Selectables {
        SelectionEngine::new(&self.catalogue, &self.config).selectables(&self.plan)
    }

    /// 已选子卷在已选分切方案上的条位排布 (未选分切方案时为 None)
    pub fn placement_laizes(&self) -> Option<PlacementLaizes> {
        let refente = self.plan.refente.as_ref()?;
        let blocs: Vec<BlocLaize> = self.plan.bobines_filles.iter().map(BlocLaize::from).collect();
        placer_blocs(&refente.laizes, &blocs)
    }

    /// 当前计划的墨槽分配
    pub fn affectation_encriers(&self) -> Result<AffectationEncriers, EncrierError> {
        let engine = SelectionEngine::new(&self.catalogue, &self.config);
        affecter_encriers(&self.plan.exigences_couleur(), engine.press())
    }

    // ==========================================
    // 单值维度 (None 表示取消选择)
    // ==========================================
    // 不兼容的选择允许写入, 表现为空 Selectables

    pub fn set_perfo(&mut self, code: Option<&str>) -> SessionResult<()> {
        self.plan.perfo = match code {
            None => None,
            Some(code) => Some(
                self.catalogue
                    .find_perfo(code)
                    .cloned()
                    .ok_or_else(|| inconnue(Dimension::Perfo, code))?,
            ),
        };
        Ok(())
    }

    pub fn set_refente(&mut self, code: Option<&str>) -> SessionResult<()> {
        self.plan.refente = match code {
            None => None,
            Some(code) => Some(
                self.catalogue
                    .find_refente(code)
                    .cloned()
                    .ok_or_else(|| inconnue(Dimension::Refente, code))?,
            ),
        };
        Ok(())
    }

    pub fn set_bobine_mere_papier(&mut self, code: Option<&str>) -> SessionResult<()> {
        self.plan.bobine_mere_papier = match code {
            None => None,
            Some(code) => Some(
                self.catalogue
                    .find_bobine_mere_papier(code)
                    .cloned()
                    .ok_or_else(|| inconnue(Dimension::BobineMerePapier, code))?,
            ),
        };
        Ok(())
    }

    pub fn set_bobine_mere_polypro(&mut self, code: Option<&str>) -> SessionResult<()> {
        self.plan.bobine_mere_polypro = match code {
            None => None,
            Some(code) => Some(
                self.catalogue
                    .find_bobine_mere_polypro(code)
                    .cloned()
                    .ok_or_else(|| inconnue(Dimension::BobineMerePolypro, code))?,
            ),
        };
        Ok(())
    }

    // ==========================================
    // 子卷 (多值维度)
    // ==========================================

    /// 添加子卷分配
    ///
    /// # 规则
    /// 1. 在 (编码, 拼版数) 的全部变体中, 当前可选的变体优先
    /// 2. 取第一个通过墨槽校验的变体
    /// 3. 全部不可行 → Infaisable, 计划不变
    ///
    /// # 返回
    /// - 添加后计划的墨槽分配
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn add_bobine_fille(&mut self, code: &str, pose: u32) -> SessionResult<AffectationEncriers> {
        let mut variantes: Vec<&BobineFilleClichePose> =
            self.catalogue.variantes(code, pose).collect();
        if variantes.is_empty() {
            return Err(SessionError::VarianteInconnue {
                code: code.to_string(),
                pose,
            });
        }

        let engine = SelectionEngine::new(&self.catalogue, &self.config);
        let selectables = engine.selectables(&self.plan);
        variantes.sort_by_key(|v| {
            !selectables
                .bobines_filles
                .iter()
                .any(|c| c.variante.hash == v.hash)
        });

        let mut exigences = self.plan.exigences_couleur();
        let mut derniere_erreur = None;
        let mut retenue = None;
        for variante in variantes {
            exigences.push(variante.exigence_couleur());
            match affecter_encriers(&exigences, engine.press()) {
                Ok(affectation) => {
                    retenue = Some((variante.clone(), affectation));
                    break;
                }
                Err(e) => derniere_erreur = Some(e),
            }
            exigences.pop();
        }

        let (variante, affectation) = match (retenue, derniere_erreur) {
            (Some(retenue), _) => retenue,
            (None, Some(e)) => {
                warn!(code, pose, error = %e, "子卷添加失败: 墨槽不可行");
                return Err(SessionError::Infaisable(e));
            }
            (None, None) => {
                return Err(SessionError::VarianteInconnue {
                    code: code.to_string(),
                    pose,
                })
            }
        };

        self.couleurs = self.couleurs.union(&multiset_couleurs(&variante));
        self.emplacements = self.emplacements.union(&multiset_emplacements(&variante));
        self.plan.bobines_filles.push(variante);
        info!(
            code,
            pose,
            poses = self.plan.nombre_poses(),
            encriers = affectation.nombre_classes(),
            "子卷已添加"
        );
        Ok(affectation)
    }

    /// 移除一个子卷分配 (最近添加的同编码同拼版数分配)
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn remove_bobine_fille(&mut self, code: &str, pose: u32) -> SessionResult<()> {
        let index = self
            .plan
            .bobines_filles
            .iter()
            .rposition(|v| v.code == code && v.pose == pose)
            .ok_or_else(|| SessionError::NonSelectionnee {
                code: code.to_string(),
                pose,
            })?;

        let variante = &self.plan.bobines_filles[index];
        let couleurs = self.couleurs.difference(&multiset_couleurs(variante))?;
        let emplacements = self
            .emplacements
            .difference(&multiset_emplacements(variante))?;

        self.couleurs = couleurs;
        self.emplacements = emplacements;
        self.plan.bobines_filles.remove(index);
        info!(code, pose, "子卷已移除");
        Ok(())
    }

    /// 清空计划
    pub fn clear_plan(&mut self) {
        self.plan = PlanProduction::new();
        self.couleurs = Multiset::new();
        self.emplacements = Multiset::new();
    }
}

fn inconnue(dimension: Dimension, code: &str) -> SessionError {
    SessionError::ReferenceInconnue {
        dimension,
        code: code.to_string(),
    }
}
