// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use refente_engine::domain::catalog::{
    RawBobineFille, RawBobineMere, RawCatalogue, RawCliche, RawPerfo, RawRefente,
};

// ==========================================
// 原始行构建函数
// ==========================================

pub fn bobine_mere(code: &str, laize: f64, grammage: f64, couleur_papier: &str) -> RawBobineMere {
    RawBobineMere {
        code: code.to_string(),
        laize: Some(laize),
        grammage: Some(grammage),
        couleur_papier: Some(couleur_papier.to_string()),
        sommeil: false,
    }
}

pub fn bobine_mere_polypro(code: &str, laize: f64) -> RawBobineMere {
    RawBobineMere {
        code: code.to_string(),
        laize: Some(laize),
        grammage: None,
        couleur_papier: Some("POLYPRO".to_string()),
        sommeil: false,
    }
}

pub fn perfo(code: &str) -> RawPerfo {
    let mut row = RawPerfo {
        code: code.to_string(),
        ..Default::default()
    };
    row.cales[0] = Some(2.0);
    row.bagues[0] = Some(4.0);
    row
}

pub fn refente(code: &str, code_perfo: &str, laizes: &[f64]) -> RawRefente {
    let mut row = RawRefente {
        code: code.to_string(),
        code_perfo: Some(code_perfo.to_string()),
        ..Default::default()
    };
    for (slot, laize) in row.laizes.iter_mut().zip(laizes) {
        *slot = Some(*laize);
    }
    row
}

// ==========================================
// 印版构建器
// ==========================================

pub struct ClicheBuilder {
    row: RawCliche,
}

impl ClicheBuilder {
    pub fn new(code: &str) -> Self {
        Self {
            row: RawCliche {
                code: code.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn poses(mut self, poses: &[i32]) -> Self {
        for (slot, pose) in self.row.poses.iter_mut().zip(poses) {
            *slot = Some(*pose);
        }
        self
    }

    pub fn couleurs(mut self, couleurs: &[&str]) -> Self {
        for (slot, couleur) in self.row.couleurs.iter_mut().zip(couleurs) {
            *slot = Some(couleur.to_string());
        }
        self
    }

    pub fn ordre_important(mut self) -> Self {
        self.row.importance_ordre_couleurs = Some(true);
        self
    }

    pub fn build(self) -> RawCliche {
        self.row
    }
}

// ==========================================
// 子卷构建器
// ==========================================

pub struct BobineFilleBuilder {
    row: RawBobineFille,
}

impl BobineFilleBuilder {
    /// 默认纸色 BLANC, 克重 80
    pub fn new(code: &str, laize: f64) -> Self {
        Self {
            row: RawBobineFille {
                code: code.to_string(),
                laize: Some(laize),
                grammage: Some(80.0),
                couleur_papier: Some("BLANC".to_string()),
                ..Default::default()
            },
        }
    }

    pub fn papier(mut self, couleur: &str, grammage: f64) -> Self {
        self.row.couleur_papier = Some(couleur.to_string());
        self.row.grammage = Some(grammage);
        self
    }

    pub fn cliche(mut self, code: &str) -> Self {
        if self.row.code_cliche_1.is_none() {
            self.row.code_cliche_1 = Some(code.to_string());
        } else {
            self.row.code_cliche_2 = Some(code.to_string());
        }
        self
    }

    pub fn sommeil(mut self) -> Self {
        self.row.sommeil = true;
        self
    }

    pub fn build(self) -> RawBobineFille {
        self.row
    }
}

// ==========================================
// 标准测试目录
// ==========================================
// 母卷: BM300 / BM305 / BM250 (BLANC 80), BM-KRAFT (KRAFT 90), BM-ECRU (ECRU ENDUIT 80),
//       PP300 (聚丙烯), BM-DORT (休眠)
// 打孔: P1 / P2 / P-ORPHELIN (无分切方案引用) / P-DORT (休眠)
// 分切: R300 = P1 [100,100,100], RMIX = P1 [100,100,50,50], R250 = P2 [125,125]
// 子卷: F-ROUGE (100, 拼版 1/2), F-BLEU (100, 拼版 1), F-VERT (100, 拼版 1/3),
//       F-125 (125, 红), F-50 (50, 无印版), F-KRAFT (100, KRAFT 90, 无印版)

pub fn catalogue_standard() -> RawCatalogue {
    let mut perfo_dort = perfo("P-DORT");
    perfo_dort.sommeil = true;
    let mut mere_dort = bobine_mere("BM-DORT", 300.0, 80.0, "BLANC");
    mere_dort.sommeil = true;

    RawCatalogue {
        bobines_meres: vec![
            bobine_mere("BM300", 300.0, 80.0, "BLANC"),
            bobine_mere("BM305", 305.0, 80.0, "BLANC"),
            bobine_mere("BM250", 250.0, 80.0, "BLANC"),
            bobine_mere("BM-KRAFT", 300.0, 90.0, "KRAFT"),
            bobine_mere("BM-ECRU", 300.0, 80.0, "ECRU ENDUIT"),
            bobine_mere_polypro("PP300", 300.0),
            mere_dort,
        ],
        bobines_filles: vec![
            BobineFilleBuilder::new("F-ROUGE", 100.0).cliche("C-ROUGE").build(),
            BobineFilleBuilder::new("F-BLEU", 100.0).cliche("C-BLEU").build(),
            BobineFilleBuilder::new("F-VERT", 100.0).cliche("C-VERT").build(),
            BobineFilleBuilder::new("F-125", 125.0).cliche("C-ROUGE").build(),
            BobineFilleBuilder::new("F-50", 50.0).build(),
            BobineFilleBuilder::new("F-KRAFT", 100.0)
                .papier("KRAFT", 90.0)
                .build(),
        ],
        cliches: vec![
            ClicheBuilder::new("C-ROUGE")
                .poses(&[1, 2])
                .couleurs(&["rouge"])
                .build(),
            ClicheBuilder::new("C-BLEU")
                .poses(&[1])
                .couleurs(&["bleu"])
                .build(),
            ClicheBuilder::new("C-VERT")
                .poses(&[1, 3])
                .couleurs(&["vert"])
                .build(),
        ],
        perfos: vec![
            perfo("P1"),
            perfo("P2"),
            perfo("P-ORPHELIN"),
            perfo_dort,
        ],
        refentes: vec![
            refente("R300", "P1", &[100.0, 100.0, 100.0]),
            refente("RMIX", "P1", &[100.0, 100.0, 50.0, 50.0]),
            refente("R250", "P2", &[125.0, 125.0]),
        ],
    }
}
