// ==========================================
// 编辑会话与应用状态集成测试
// ==========================================
// 测试目标: 计划变更、多重集同步、失败时计划不变、快照隔离
// ==========================================

mod helpers;

use helpers::{catalogue_canonique, catalogue_standard, config_encriers};
use refente_engine::importer::MemoryCatalogSource;
use refente_engine::{AppState, CatalogueCanonique, Dimension, EngineConfig, SessionError};

fn state(config: EngineConfig) -> AppState {
    AppState::new(config, catalogue_canonique())
}

// ==========================================
// 测试 1: 添加/移除子卷
// ==========================================

#[test]
fn test_add_and_remove_bobine_fille() {
    let state = state(EngineConfig::default());
    let mut session = state.ouvrir_session();

    let affectation = session.add_bobine_fille("F-ROUGE", 2).unwrap();
    assert_eq!(affectation.nombre_classes(), 1);
    assert_eq!(session.plan().bobines_filles.len(), 1);
    assert_eq!(session.plan().bobines_filles[0].pose, 2);
    assert_eq!(session.couleurs().count(&"rouge".to_string()), 2);
    assert_eq!(session.emplacements().total(), 2);

    session.add_bobine_fille("F-BLEU", 1).unwrap();
    assert_eq!(session.couleurs().total(), 3);
    assert_eq!(session.plan().nombre_poses(), 3);

    session.remove_bobine_fille("F-ROUGE", 2).unwrap();
    assert_eq!(session.couleurs().count(&"rouge".to_string()), 0);
    assert_eq!(session.couleurs().total(), 1);
    assert_eq!(session.emplacements().total(), 1);
    assert_eq!(session.plan().bobines_filles[0].code, "F-BLEU");
}

#[test]
fn test_remove_unknown_assignment() {
    let state = state(EngineConfig::default());
    let mut session = state.ouvrir_session();
    session.add_bobine_fille("F-ROUGE", 1).unwrap();

    let err = session.remove_bobine_fille("F-ROUGE", 2).unwrap_err();
    assert_eq!(
        err,
        SessionError::NonSelectionnee {
            code: "F-ROUGE".to_string(),
            pose: 2
        }
    );
    assert_eq!(session.plan().bobines_filles.len(), 1);
}

#[test]
fn test_add_unknown_variant() {
    let state = state(EngineConfig::default());
    let mut session = state.ouvrir_session();

    assert!(matches!(
        session.add_bobine_fille("F-BLEU", 3),
        Err(SessionError::VarianteInconnue { .. })
    ));
    assert!(matches!(
        session.add_bobine_fille("INCONNU", 1),
        Err(SessionError::VarianteInconnue { .. })
    ));
    assert!(session.plan().is_empty());
}

// ==========================================
// 测试 2: 墨槽不可行时计划不变
// ==========================================

#[test]
fn test_infeasible_add_leaves_plan_unchanged() {
    let state = state(config_encriers(1));
    let mut session = state.ouvrir_session();
    session.add_bobine_fille("F-ROUGE", 1).unwrap();
    let avant = session.plan().clone();
    let couleurs_avant = session.couleurs().clone();

    let err = session.add_bobine_fille("F-BLEU", 1).unwrap_err();
    assert!(matches!(err, SessionError::Infaisable(_)));
    assert_eq!(session.plan(), &avant);
    assert_eq!(session.couleurs(), &couleurs_avant);

    // 同一颜色类别共用墨槽
    session.add_bobine_fille("F-ROUGE", 2).unwrap();
    let affectation = session.affectation_encriers().unwrap();
    assert_eq!(affectation.nombre_classes(), 1);
}

// ==========================================
// 测试 3: 单值维度
// ==========================================

#[test]
fn test_set_unknown_reference() {
    let state = state(EngineConfig::default());
    let mut session = state.ouvrir_session();

    assert_eq!(
        session.set_refente(Some("R999")),
        Err(SessionError::ReferenceInconnue {
            dimension: Dimension::Refente,
            code: "R999".to_string()
        })
    );
    assert!(session.set_perfo(Some("P-DORT")).is_err());
    assert!(session.set_bobine_mere_polypro(Some("BM300")).is_err());
}

#[test]
fn test_incompatible_choice_surfaces_as_empty() {
    let state = state(EngineConfig::default());
    let mut session = state.ouvrir_session();

    session.set_refente(Some("R250")).unwrap();
    session.set_bobine_mere_papier(Some("BM300")).unwrap();
    assert!(session.selectables().is_empty());

    // 取消选择后恢复
    session.set_bobine_mere_papier(None).unwrap();
    assert!(!session.selectables().is_empty());
}

#[test]
fn test_placement_laizes() {
    let state = state(EngineConfig::default());
    let mut session = state.ouvrir_session();
    session.add_bobine_fille("F-ROUGE", 2).unwrap();
    assert!(session.placement_laizes().is_none());

    session.set_refente(Some("R300")).unwrap();
    session.set_perfo(Some("P1")).unwrap();
    session.add_bobine_fille("F-BLEU", 1).unwrap();

    let placement = session.placement_laizes().unwrap();
    assert_eq!(placement.premieres_laizes.len(), 2);
    assert_ne!(placement.premieres_laizes[0], placement.premieres_laizes[1]);
}

#[test]
fn test_clear_plan() {
    let state = state(EngineConfig::default());
    let mut session = state.ouvrir_session();
    session.set_refente(Some("R300")).unwrap();
    session.add_bobine_fille("F-VERT", 3).unwrap();

    session.clear_plan();
    assert!(session.plan().is_empty());
    assert!(session.couleurs().is_empty());
    assert!(session.emplacements().is_empty());
}

// ==========================================
// 测试 4: 会话隔离与快照替换
// ==========================================

#[test]
fn test_sessions_are_independent() {
    let state = state(EngineConfig::default());
    let mut a = state.ouvrir_session();
    let b = state.ouvrir_session();
    assert_ne!(a.id(), b.id());

    a.add_bobine_fille("F-ROUGE", 1).unwrap();
    assert!(b.plan().is_empty());
}

#[test]
fn test_replacing_catalogue_keeps_open_sessions() {
    let state = state(EngineConfig::default());
    let session = state.ouvrir_session();

    let ancien = state.remplacer_catalogue(CatalogueCanonique::default());
    assert_eq!(ancien.statistiques.variantes, 21);
    assert_eq!(session.catalogue().bobines_filles.len(), 21);
    assert!(state.catalogue().bobines_filles.is_empty());
    assert!(state.ouvrir_session().selectables().is_empty());
}

#[tokio::test]
async fn test_reload_from_memory_source() {
    let state = AppState::new(EngineConfig::default(), CatalogueCanonique::default());
    let source = MemoryCatalogSource::new(catalogue_standard());

    let catalogue = state.recharger(&source).await.unwrap();
    assert_eq!(catalogue.refentes.len(), 3);
    assert_eq!(state.catalogue().bobines_filles.len(), 21);
}
