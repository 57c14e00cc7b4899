// ==========================================
// 分切/印刷机生产配置引擎 - 原始目录行
// ==========================================
// 职责: 持久化协作方提供的扁平目录记录
// 约定: 标识字段必填; 其余字段 Option (None = 缺失, 有效性另行校验)
// ==========================================

use crate::domain::types::{
    MAX_CALES_PERFO, MAX_COULEURS_CLICHE, MAX_LAIZES_REFENTE, MAX_POSES_CLICHE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 母卷原始行 (纸质与聚丙烯共用一张表)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBobineMere {
    pub code: String,
    pub laize: Option<f64>,
    pub grammage: Option<f64>,
    pub couleur_papier: Option<String>,
    #[serde(default)]
    pub sommeil: bool,
}

/// 子卷原始行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBobineFille {
    pub code: String,
    pub laize: Option<f64>,
    pub grammage: Option<f64>,
    pub couleur_papier: Option<String>,
    #[serde(default)]
    pub sommeil: bool,
    pub code_cliche_1: Option<String>,
    pub code_cliche_2: Option<String>,
}

impl RawBobineFille {
    /// 非空的印版引用 (去空白)
    pub fn codes_cliches(&self) -> impl Iterator<Item = &str> {
        [self.code_cliche_1.as_deref(), self.code_cliche_2.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

/// 印版原始行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCliche {
    pub code: String,
    #[serde(default)]
    pub poses: [Option<i32>; MAX_POSES_CLICHE],
    #[serde(default)]
    pub couleurs: [Option<String>; MAX_COULEURS_CLICHE],
    pub importance_ordre_couleurs: Option<bool>,
}

/// 打孔方案原始行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPerfo {
    pub code: String,
    #[serde(default)]
    pub cales: [Option<f64>; MAX_CALES_PERFO],
    #[serde(default)]
    pub bagues: [Option<f64>; MAX_CALES_PERFO],
    #[serde(default)]
    pub sommeil: bool,
}

/// 分切方案原始行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRefente {
    pub code: String,
    pub code_perfo: Option<String>,
    #[serde(default)]
    pub laizes: [Option<f64>; MAX_LAIZES_REFENTE],
    pub chute: Option<f64>,
    #[serde(default)]
    pub sommeil: bool,
}

/// 按编码索引的印版
pub type ClichesParCode = HashMap<String, RawCliche>;

/// 一次目录快照的全部原始行
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCatalogue {
    pub bobines_meres: Vec<RawBobineMere>,
    pub bobines_filles: Vec<RawBobineFille>,
    pub cliches: Vec<RawCliche>,
    pub perfos: Vec<RawPerfo>,
    pub refentes: Vec<RawRefente>,
}

impl RawCatalogue {
    /// 印版按编码建索引 (编码重复时保留首行)
    pub fn cliches_par_code(&self) -> ClichesParCode {
        let mut index = ClichesParCode::with_capacity(self.cliches.len());
        for cliche in &self.cliches {
            index
                .entry(cliche.code.trim().to_string())
                .or_insert_with(|| cliche.clone());
        }
        index
    }
}
