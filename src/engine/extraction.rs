// ==========================================
// 分切/印刷机生产配置引擎 - 规范化抽取
// ==========================================
// 职责: 原始目录行 → 已校验的规范候选
// 红线: 全部函数为全函数, 不抛错; 无效行只产生空结果
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::candidate::{
    BobineFilleClichePose, BobineMerePapier, BobineMerePolypro, CaleBague, Perfo, Refente,
};
use crate::domain::catalog::{
    ClichesParCode, RawBobineFille, RawBobineMere, RawCliche, RawPerfo, RawRefente,
};
use crate::domain::types::{
    ModeChute, RaisonExclusion, COULEUR_ECRU, COULEUR_ECRU_ENDUIT, COULEUR_POLYPRO,
    NOMBRE_POSES_NEUTRES,
};
use crate::engine::multiset::Multiset;
use std::collections::HashSet;

// ==========================================
// 字段校验工具
// ==========================================

fn valider_positif(valeur: Option<f64>, champ: &'static str) -> Result<f64, RaisonExclusion> {
    match valeur {
        None => Err(RaisonExclusion::ChampManquant(champ)),
        Some(v) if v > 0.0 && v.is_finite() => Ok(v),
        Some(_) => Err(RaisonExclusion::ChampInvalide(champ)),
    }
}

fn valider_texte(valeur: Option<&str>, champ: &'static str) -> Result<String, RaisonExclusion> {
    match valeur.map(str::trim) {
        None => Err(RaisonExclusion::ChampManquant(champ)),
        Some("") => Err(RaisonExclusion::ChampInvalide(champ)),
        Some(v) => Ok(v.to_string()),
    }
}

/// 纸色归一: "ECRU ENDUIT" → "ECRU"
pub fn normaliser_couleur_papier(couleur: &str) -> String {
    let couleur = couleur.trim();
    if couleur == COULEUR_ECRU_ENDUIT {
        COULEUR_ECRU.to_string()
    } else {
        couleur.to_string()
    }
}

// ==========================================
// 子卷拼版变体
// ==========================================

/// 子卷有效字段 (宽度, 克重, 纸色)
fn valider_bobine_fille(row: &RawBobineFille) -> Result<(f64, f64, String), RaisonExclusion> {
    if row.sommeil {
        return Err(RaisonExclusion::Sommeil);
    }
    let laize = valider_positif(row.laize, "laize")?;
    let grammage = valider_positif(row.grammage, "grammage")?;
    let couleur_papier = valider_texte(row.couleur_papier.as_deref(), "couleur_papier")?;
    Ok((laize, grammage, couleur_papier))
}

/// 子卷行为何不产生任何变体
pub fn exclusion_reason_bobine_fille(row: &RawBobineFille) -> Option<RaisonExclusion> {
    valider_bobine_fille(row).err()
}

/// 变体 hash: 宽度 + 拼版数 + 两个颜色列表
///
/// 无序颜色先经多重集去重排序, 因此 {rouge, bleu} 与 {bleu, rouge} 得到同一 hash;
/// 有序颜色保持原序。
pub fn hash_variante(
    laize: f64,
    pose: u32,
    couleurs_ordonnees: &[String],
    couleurs_non_ordonnees: &[String],
) -> String {
    let non_ordonnees: Multiset<&str> = couleurs_non_ordonnees.iter().map(String::as_str).collect();
    let non_ordonnees: Vec<&str> = non_ordonnees.keys().copied().collect();
    format!(
        "{}|P{}|O[{}]|N[{}]",
        laize,
        pose,
        couleurs_ordonnees.join(","),
        non_ordonnees.join(",")
    )
}

struct CouleursCliche {
    ordonnees: Vec<String>,
    non_ordonnees: Vec<String>,
}

fn couleurs_cliche(cliche: &RawCliche) -> CouleursCliche {
    let couleurs: Vec<String> = cliche
        .couleurs
        .iter()
        .flatten()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    if cliche.importance_ordre_couleurs.unwrap_or(false) {
        CouleursCliche {
            ordonnees: couleurs,
            non_ordonnees: Vec::new(),
        }
    } else {
        // 无序: 去重并排序
        let ensemble: Multiset<String> = couleurs.into_iter().collect();
        CouleursCliche {
            ordonnees: Vec::new(),
            non_ordonnees: ensemble.keys().cloned().collect(),
        }
    }
}

/// 子卷行 → 拼版变体列表
///
/// # 规则
/// 1. 休眠或缺少宽度/克重/纸色 → 空列表
/// 2. 解析至多两个印版; 每个印版: 正拼版数 × 固定颜色集
/// 3. 两个印版引用都无法解析 → 7 个中性拼版 (1..=7, 无颜色)
/// 4. 纸色 "ECRU ENDUIT" → "ECRU"
/// 5. 同一子卷内 hash 相同的变体只保留一个
pub fn extract_bobine_fille_variants(
    row: &RawBobineFille,
    cliches: &ClichesParCode,
) -> Vec<BobineFilleClichePose> {
    let (laize, grammage, couleur_papier) = match valider_bobine_fille(row) {
        Ok(valide) => valide,
        Err(_) => return Vec::new(),
    };
    let couleur_papier = normaliser_couleur_papier(&couleur_papier);
    let code = row.code.trim().to_string();

    let resolus: Vec<(&str, &RawCliche)> = row
        .codes_cliches()
        .filter_map(|c| cliches.get(c).map(|cliche| (c, cliche)))
        .collect();

    let variante = |pose: u32,
                    code_cliche: Option<&str>,
                    ordonnees: Vec<String>,
                    non_ordonnees: Vec<String>| BobineFilleClichePose {
        code: code.clone(),
        laize,
        couleur_papier: couleur_papier.clone(),
        grammage,
        pose,
        code_cliche: code_cliche.map(str::to_string),
        hash: hash_variante(laize, pose, &ordonnees, &non_ordonnees),
        couleurs_ordonnees: ordonnees,
        couleurs_non_ordonnees: non_ordonnees,
    };

    if resolus.is_empty() {
        return (1..=NOMBRE_POSES_NEUTRES)
            .map(|pose| variante(pose, None, Vec::new(), Vec::new()))
            .collect();
    }

    let mut vus = HashSet::new();
    let mut variantes = Vec::new();
    for (code_cliche, cliche) in resolus {
        let couleurs = couleurs_cliche(cliche);
        let poses = cliche
            .poses
            .iter()
            .flatten()
            .filter(|p| **p > 0)
            .map(|p| *p as u32);
        for pose in poses {
            let v = variante(
                pose,
                Some(code_cliche),
                couleurs.ordonnees.clone(),
                couleurs.non_ordonnees.clone(),
            );
            if vus.insert(v.hash.clone()) {
                variantes.push(v);
            }
        }
    }
    variantes
}

// ==========================================
// 母卷
// ==========================================

fn est_polypro(row: &RawBobineMere) -> bool {
    row.couleur_papier
        .as_deref()
        .map(|c| c.trim() == COULEUR_POLYPRO)
        .unwrap_or(false)
}

fn valider_bobine_mere_papier(row: &RawBobineMere) -> Result<BobineMerePapier, RaisonExclusion> {
    if row.sommeil {
        return Err(RaisonExclusion::Sommeil);
    }
    let laize = valider_positif(row.laize, "laize")?;
    let grammage = valider_positif(row.grammage, "grammage")?;
    let couleur_papier = valider_texte(row.couleur_papier.as_deref(), "couleur_papier")?;
    Ok(BobineMerePapier {
        code: row.code.trim().to_string(),
        laize,
        grammage,
        couleur_papier: normaliser_couleur_papier(&couleur_papier),
    })
}

fn valider_bobine_mere_polypro(row: &RawBobineMere) -> Result<BobineMerePolypro, RaisonExclusion> {
    if row.sommeil {
        return Err(RaisonExclusion::Sommeil);
    }
    let laize = valider_positif(row.laize, "laize")?;
    Ok(BobineMerePolypro {
        code: row.code.trim().to_string(),
        laize,
    })
}

/// 纸质母卷 (纸色非 POLYPRO)
pub fn extract_bobine_mere_papier(row: &RawBobineMere) -> Option<BobineMerePapier> {
    if est_polypro(row) {
        return None;
    }
    valider_bobine_mere_papier(row).ok()
}

/// 聚丙烯母卷 (纸色 = POLYPRO)
pub fn extract_bobine_mere_polypro(row: &RawBobineMere) -> Option<BobineMerePolypro> {
    if !est_polypro(row) {
        return None;
    }
    valider_bobine_mere_polypro(row).ok()
}

pub fn exclusion_reason_bobine_mere(row: &RawBobineMere) -> Option<RaisonExclusion> {
    if est_polypro(row) {
        valider_bobine_mere_polypro(row).err()
    } else {
        valider_bobine_mere_papier(row).err()
    }
}

// ==========================================
// 打孔方案
// ==========================================

/// 透传, 仅过滤休眠行; 去掉两侧都为空的 (垫片, 环) 对
pub fn extract_perfo(row: &RawPerfo) -> Option<Perfo> {
    if row.sommeil {
        return None;
    }
    let cales_bagues = row
        .cales
        .iter()
        .zip(row.bagues.iter())
        .filter(|(cale, bague)| cale.is_some() || bague.is_some())
        .map(|(cale, bague)| CaleBague {
            cale: *cale,
            bague: *bague,
        })
        .collect();
    Some(Perfo {
        code: row.code.trim().to_string(),
        cales_bagues,
    })
}

pub fn exclusion_reason_perfo(row: &RawPerfo) -> Option<RaisonExclusion> {
    row.sommeil.then_some(RaisonExclusion::Sommeil)
}

// ==========================================
// 分切方案
// ==========================================

/// 分切总宽 = round(正条宽之和) ± chute (按 ModeChute)
pub fn laize_totale_refente(laizes: &[f64], chute: Option<f64>, mode_chute: ModeChute) -> f64 {
    let somme = laizes.iter().sum::<f64>().round();
    match chute {
        Some(chute) if chute.is_finite() => mode_chute.appliquer(somme, chute),
        _ => somme,
    }
}

pub fn extract_refente(row: &RawRefente, mode_chute: ModeChute) -> Option<Refente> {
    if row.sommeil {
        return None;
    }
    let laizes: Vec<f64> = row
        .laizes
        .iter()
        .flatten()
        .copied()
        .filter(|l| *l > 0.0 && l.is_finite())
        .collect();
    let code_perfo = row
        .code_perfo
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    Some(Refente {
        code: row.code.trim().to_string(),
        code_perfo,
        laize_totale: laize_totale_refente(&laizes, row.chute, mode_chute),
        chute: row.chute,
        laizes,
    })
}

pub fn exclusion_reason_refente(row: &RawRefente) -> Option<RaisonExclusion> {
    row.sommeil.then_some(RaisonExclusion::Sommeil)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bobine_fille(code: &str, cliche: Option<&str>) -> RawBobineFille {
        RawBobineFille {
            code: code.to_string(),
            laize: Some(100.0),
            grammage: Some(80.0),
            couleur_papier: Some("BLANC".to_string()),
            sommeil: false,
            code_cliche_1: cliche.map(str::to_string),
            code_cliche_2: None,
        }
    }

    fn cliche(code: &str, poses: &[i32], couleurs: &[&str], ordre: bool) -> RawCliche {
        let mut c = RawCliche {
            code: code.to_string(),
            importance_ordre_couleurs: Some(ordre),
            ..Default::default()
        };
        for (i, p) in poses.iter().enumerate() {
            c.poses[i] = Some(*p);
        }
        for (i, couleur) in couleurs.iter().enumerate() {
            c.couleurs[i] = Some(couleur.to_string());
        }
        c
    }

    fn index(cliches: Vec<RawCliche>) -> ClichesParCode {
        cliches.into_iter().map(|c| (c.code.clone(), c)).collect()
    }

    // ==========================================
    // 测试 1: 子卷校验门控
    // ==========================================

    #[test]
    fn test_sommeil_yields_nothing() {
        let mut row = bobine_fille("BF1", Some("C1"));
        row.sommeil = true;
        let cliches = index(vec![cliche("C1", &[2], &["rouge"], false)]);
        assert!(extract_bobine_fille_variants(&row, &cliches).is_empty());
        assert_eq!(
            exclusion_reason_bobine_fille(&row),
            Some(RaisonExclusion::Sommeil)
        );
    }

    #[test]
    fn test_missing_vs_invalid_laize() {
        let mut row = bobine_fille("BF1", None);
        row.laize = None;
        assert_eq!(
            exclusion_reason_bobine_fille(&row),
            Some(RaisonExclusion::ChampManquant("laize"))
        );
        row.laize = Some(0.0);
        assert_eq!(
            exclusion_reason_bobine_fille(&row),
            Some(RaisonExclusion::ChampInvalide("laize"))
        );
        assert!(extract_bobine_fille_variants(&row, &ClichesParCode::new()).is_empty());
    }

    #[test]
    fn test_empty_paper_color_excluded() {
        let mut row = bobine_fille("BF1", None);
        row.couleur_papier = Some("  ".to_string());
        assert!(extract_bobine_fille_variants(&row, &ClichesParCode::new()).is_empty());
    }

    // ==========================================
    // 测试 2: 中性拼版
    // ==========================================

    #[test]
    fn test_no_cliche_yields_seven_neutral_poses() {
        let row = bobine_fille("BF1", None);
        let variantes = extract_bobine_fille_variants(&row, &ClichesParCode::new());
        assert_eq!(variantes.len(), 7);
        for (i, v) in variantes.iter().enumerate() {
            assert_eq!(v.pose, i as u32 + 1);
            assert!(v.is_pose_neutre());
            assert!(v.couleurs_ordonnees.is_empty());
            assert!(v.couleurs_non_ordonnees.is_empty());
        }
    }

    #[test]
    fn test_unresolved_cliche_falls_back_to_neutral() {
        let row = bobine_fille("BF1", Some("INCONNU"));
        let variantes = extract_bobine_fille_variants(&row, &ClichesParCode::new());
        assert_eq!(variantes.len(), 7);
    }

    // ==========================================
    // 测试 3: 印版展开
    // ==========================================

    #[test]
    fn test_cliche_poses_cross_colors() {
        let row = bobine_fille("BF1", Some("C1"));
        let cliches = index(vec![cliche("C1", &[2, 0, 3, -1], &["rouge", "", "bleu"], false)]);
        let variantes = extract_bobine_fille_variants(&row, &cliches);
        assert_eq!(variantes.len(), 2);
        assert_eq!(variantes[0].pose, 2);
        assert_eq!(variantes[1].pose, 3);
        for v in &variantes {
            assert_eq!(v.code_cliche.as_deref(), Some("C1"));
            assert_eq!(v.couleurs_non_ordonnees, vec!["bleu", "rouge"]);
            assert!(!v.ordre_important());
        }
    }

    #[test]
    fn test_two_cliches_both_resolved() {
        let mut row = bobine_fille("BF1", Some("C1"));
        row.code_cliche_2 = Some("C2".to_string());
        let cliches = index(vec![
            cliche("C1", &[1], &["rouge"], false),
            cliche("C2", &[1], &["noir", "jaune"], true),
        ]);
        let variantes = extract_bobine_fille_variants(&row, &cliches);
        assert_eq!(variantes.len(), 2);
        assert_eq!(variantes[1].couleurs_ordonnees, vec!["noir", "jaune"]);
        assert!(variantes[1].ordre_important());
    }

    #[test]
    fn test_duplicate_hash_within_reel_kept_once() {
        let mut row = bobine_fille("BF1", Some("C1"));
        row.code_cliche_2 = Some("C1".to_string());
        let cliches = index(vec![cliche("C1", &[2], &["rouge"], false)]);
        assert_eq!(extract_bobine_fille_variants(&row, &cliches).len(), 1);
    }

    #[test]
    fn test_ecru_enduit_normalized() {
        let mut row = bobine_fille("BF1", None);
        row.couleur_papier = Some("ECRU ENDUIT".to_string());
        let variantes = extract_bobine_fille_variants(&row, &ClichesParCode::new());
        assert!(variantes.iter().all(|v| v.couleur_papier == "ECRU"));
    }

    // ==========================================
    // 测试 4: hash 确定性
    // ==========================================

    fn s(couleurs: &[&str]) -> Vec<String> {
        couleurs.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_hash_deterministic() {
        let a = hash_variante(100.0, 2, &[], &s(&["rouge", "bleu"]));
        let b = hash_variante(100.0, 2, &[], &s(&["bleu", "rouge"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_changes_on_each_axis() {
        let base = hash_variante(100.0, 2, &[], &s(&["rouge"]));
        assert_ne!(base, hash_variante(120.0, 2, &[], &s(&["rouge"])));
        assert_ne!(base, hash_variante(100.0, 3, &[], &s(&["rouge"])));
        assert_ne!(base, hash_variante(100.0, 2, &[], &s(&["bleu"])));
        // 有序与无序列表不可混淆
        assert_ne!(base, hash_variante(100.0, 2, &s(&["rouge"]), &[]));
        // 有序列表顺序敏感
        assert_ne!(
            hash_variante(100.0, 2, &s(&["rouge", "bleu"]), &[]),
            hash_variante(100.0, 2, &s(&["bleu", "rouge"]), &[])
        );
    }

    // ==========================================
    // 测试 5: 母卷分类
    // ==========================================

    #[test]
    fn test_mother_reel_routing() {
        let papier = RawBobineMere {
            code: "BM1".to_string(),
            laize: Some(300.0),
            grammage: Some(80.0),
            couleur_papier: Some("BLANC".to_string()),
            sommeil: false,
        };
        assert!(extract_bobine_mere_papier(&papier).is_some());
        assert!(extract_bobine_mere_polypro(&papier).is_none());

        let polypro = RawBobineMere {
            code: "PP1".to_string(),
            laize: Some(300.0),
            grammage: None,
            couleur_papier: Some("POLYPRO".to_string()),
            sommeil: false,
        };
        assert!(extract_bobine_mere_papier(&polypro).is_none());
        assert!(extract_bobine_mere_polypro(&polypro).is_some());
    }

    #[test]
    fn test_mother_reel_invalid_dropped() {
        let row = RawBobineMere {
            code: "BM1".to_string(),
            laize: Some(300.0),
            grammage: None,
            couleur_papier: Some("BLANC".to_string()),
            sommeil: false,
        };
        assert!(extract_bobine_mere_papier(&row).is_none());
        assert_eq!(
            exclusion_reason_bobine_mere(&row),
            Some(RaisonExclusion::ChampManquant("grammage"))
        );
    }

    // ==========================================
    // 测试 6: 分切方案与打孔方案
    // ==========================================

    #[test]
    fn test_refente_total_width_with_chute_modes() {
        let mut row = RawRefente {
            code: "R1".to_string(),
            code_perfo: Some("P1".to_string()),
            chute: Some(10.0),
            ..Default::default()
        };
        row.laizes[0] = Some(100.2);
        row.laizes[1] = Some(100.2);
        row.laizes[2] = Some(-5.0);
        row.laizes[3] = Some(100.2);

        let ajout = extract_refente(&row, ModeChute::Ajout).unwrap();
        assert_eq!(ajout.laizes.len(), 3);
        assert_eq!(ajout.laize_totale, 311.0);

        let retrait = extract_refente(&row, ModeChute::Retrait).unwrap();
        assert_eq!(retrait.laize_totale, 291.0);
    }

    #[test]
    fn test_refente_and_perfo_sommeil_dropped() {
        let refente = RawRefente {
            code: "R1".to_string(),
            sommeil: true,
            ..Default::default()
        };
        assert!(extract_refente(&refente, ModeChute::Ajout).is_none());

        let perfo = RawPerfo {
            code: "P1".to_string(),
            sommeil: true,
            ..Default::default()
        };
        assert!(extract_perfo(&perfo).is_none());
    }

    #[test]
    fn test_perfo_pairs_passed_through() {
        let mut row = RawPerfo {
            code: "P1".to_string(),
            ..Default::default()
        };
        row.cales[0] = Some(1.5);
        row.bagues[0] = Some(2.0);
        row.bagues[2] = Some(3.0);
        let perfo = extract_perfo(&row).unwrap();
        assert_eq!(perfo.cales_bagues.len(), 2);
        assert_eq!(perfo.cales_bagues[1].cale, None);
        assert_eq!(perfo.cales_bagues[1].bague, Some(3.0));
    }
}
