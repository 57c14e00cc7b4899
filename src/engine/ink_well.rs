// ==========================================
// 分切/印刷机生产配置引擎 - 颜色/墨槽兼容性
// ==========================================
// 职责: 判断一组颜色约束能否在有限墨槽内同时印刷, 并给出墨槽分配
// 规则: 两个约束共用墨槽 ⇔ 都无序且集合相等, 或都有序且序列逐项相等
// 红线: 不可行结果直接返回调用方, 不自动重试
// ==========================================

use crate::config::EngineConfig;
use crate::domain::candidate::ExigenceCouleur;
use crate::engine::error::EncrierError;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// 排列搜索支持的最大墨槽数 (8! = 40320 种排列)
pub const MAX_ENCRIERS: usize = 8;

// ==========================================
// ClasseCouleur - 墨槽共用等价类
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "type", content = "couleurs", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClasseCouleur {
    /// 顺序敏感: 保持原序
    Ordonnee(Vec<String>),
    /// 顺序无关: 去重排序后的集合
    NonOrdonnee(Vec<String>),
}

impl ClasseCouleur {
    /// 无颜色的约束不需要墨槽, 返回 None
    pub fn from_exigence(exigence: &ExigenceCouleur) -> Option<Self> {
        if exigence.is_empty() {
            return None;
        }
        if exigence.ordre_important {
            Some(ClasseCouleur::Ordonnee(exigence.couleurs.clone()))
        } else {
            let mut couleurs = exigence.couleurs.clone();
            couleurs.sort();
            couleurs.dedup();
            Some(ClasseCouleur::NonOrdonnee(couleurs))
        }
    }

    pub fn couleurs(&self) -> &[String] {
        match self {
            ClasseCouleur::Ordonnee(c) | ClasseCouleur::NonOrdonnee(c) => c,
        }
    }

    pub fn ordre_important(&self) -> bool {
        matches!(self, ClasseCouleur::Ordonnee(_))
    }
}

/// 两个约束能否共用同一墨槽
pub fn partager_encrier(a: &ExigenceCouleur, b: &ExigenceCouleur) -> bool {
    ClasseCouleur::from_exigence(a) == ClasseCouleur::from_exigence(b)
}

/// 按首次出现顺序分组, 返回去重后的等价类
pub fn grouper_exigences(exigences: &[ExigenceCouleur]) -> Vec<ClasseCouleur> {
    let mut classes: Vec<ClasseCouleur> = Vec::new();
    for classe in exigences.iter().filter_map(ClasseCouleur::from_exigence) {
        if !classes.contains(&classe) {
            classes.push(classe);
        }
    }
    classes
}

// ==========================================
// PressInkWells - 印刷机墨槽模型
// ==========================================
// 墨槽位置固定; 部分墨槽可绑定专用墨 (只接受等价类别)
#[derive(Debug, Clone, PartialEq)]
pub struct PressInkWells {
    nombre_encriers: usize,
    reordonnancement: bool,
    fixes: BTreeMap<usize, ClasseCouleur>,
}

impl PressInkWells {
    /// 无绑定墨槽的印刷机 (墨槽数截断到 MAX_ENCRIERS, 限制排列搜索规模)
    pub fn new(nombre_encriers: usize, reordonnancement: bool) -> Self {
        if nombre_encriers > MAX_ENCRIERS {
            warn!(nombre_encriers, max = MAX_ENCRIERS, "墨槽数超出上限, 按上限处理");
        }
        Self {
            nombre_encriers: nombre_encriers.min(MAX_ENCRIERS),
            reordonnancement,
            fixes: BTreeMap::new(),
        }
    }

    /// 绑定墨槽 (位置越界的绑定被忽略, 由配置校验提前拦截)
    pub fn with_encrier_fixe(mut self, position: usize, exigence: &ExigenceCouleur) -> Self {
        if position < self.nombre_encriers {
            if let Some(classe) = ClasseCouleur::from_exigence(exigence) {
                self.fixes.insert(position, classe);
            }
        }
        self
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        config.encriers_fixes.iter().fold(
            Self::new(config.nombre_encriers, config.reordonnancement_encriers),
            |press, fixe| press.with_encrier_fixe(fixe.position, &fixe.exigence()),
        )
    }

    pub fn nombre_encriers(&self) -> usize {
        self.nombre_encriers
    }

    pub fn reordonnancement(&self) -> bool {
        self.reordonnancement
    }

    fn accepte(&self, position: usize, classe: &ClasseCouleur) -> bool {
        match self.fixes.get(&position) {
            None => true,
            Some(fixe) => fixe == classe,
        }
    }

    /// 按给定类别顺序, 依次放入位置递增的第一个可接受墨槽
    fn placer_dans_l_ordre(&self, classes: &[&ClasseCouleur]) -> Option<Vec<Option<ClasseCouleur>>> {
        let mut encriers = vec![None; self.nombre_encriers];
        let mut position = 0;
        for classe in classes {
            let trouve = (position..self.nombre_encriers).find(|p| self.accepte(*p, classe))?;
            encriers[trouve] = Some((*classe).clone());
            position = trouve + 1;
        }
        Some(encriers)
    }
}

// ==========================================
// AffectationEncriers - 墨槽分配结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffectationEncriers {
    /// 下标 = 墨槽位置
    pub encriers: Vec<Option<ClasseCouleur>>,
}

impl AffectationEncriers {
    pub fn nombre_classes(&self) -> usize {
        self.encriers.iter().filter(|e| e.is_some()).count()
    }

    /// 约束所在的墨槽位置; 无颜色约束返回 None
    pub fn encrier_de(&self, exigence: &ExigenceCouleur) -> Option<usize> {
        let classe = ClasseCouleur::from_exigence(exigence)?;
        self.encriers
            .iter()
            .position(|e| e.as_ref() == Some(&classe))
    }
}

/// 下一个字典序排列; 已是最后一个排列时返回 false
fn permutation_suivante(indices: &mut [usize]) -> bool {
    if indices.len() < 2 {
        return false;
    }
    let mut i = indices.len() - 1;
    while i > 0 && indices[i - 1] >= indices[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = indices.len() - 1;
    while indices[j] <= indices[i - 1] {
        j -= 1;
    }
    indices.swap(i - 1, j);
    indices[i..].reverse();
    true
}

/// 计算墨槽分配
///
/// # 规则
/// 1. 约束按共用规则分组 (首次出现顺序)
/// 2. 类别数 > 墨槽数 → 不可行
/// 3. 不允许重排: 类别按出现顺序放入递增位置的墨槽
/// 4. 允许重排: 穷举类别排列, 找到第一个可行排列即返回
///
/// # 返回
/// - Ok(AffectationEncriers): 可行分配
/// - Err(EncrierError::Infaisable): 无可行分配
#[instrument(skip(exigences, press), fields(exigences = exigences.len(), encriers = press.nombre_encriers))]
pub fn affecter_encriers(
    exigences: &[ExigenceCouleur],
    press: &PressInkWells,
) -> Result<AffectationEncriers, EncrierError> {
    let classes = grouper_exigences(exigences);
    let infaisable = EncrierError::Infaisable {
        classes: classes.len(),
        encriers: press.nombre_encriers,
    };

    if classes.len() > press.nombre_encriers {
        return Err(infaisable);
    }

    let mut ordre: Vec<usize> = (0..classes.len()).collect();
    let mut essais = 0usize;
    loop {
        essais += 1;
        let permutation: Vec<&ClasseCouleur> = ordre.iter().map(|i| &classes[*i]).collect();
        if let Some(encriers) = press.placer_dans_l_ordre(&permutation) {
            debug!(essais, classes = classes.len(), "墨槽分配可行");
            return Ok(AffectationEncriers { encriers });
        }
        if !press.reordonnancement || !permutation_suivante(&mut ordre) {
            break;
        }
    }

    debug!(essais, classes = classes.len(), "墨槽分配不可行");
    Err(infaisable)
}

/// 仅判断可行性
pub fn est_faisable(exigences: &[ExigenceCouleur], press: &PressInkWells) -> bool {
    affecter_encriers(exigences, press).is_ok()
}
