// ==========================================
// 分切/印刷机生产配置引擎 - 字段映射器
// ==========================================
// 职责: CSV 行 → 原始目录行 (别名列名 + 类型转换)
// 约定: 空单元格 → None; 无法解析的数值 → TypeConversionError
// ==========================================

use crate::domain::catalog::{RawBobineFille, RawBobineMere, RawCliche, RawPerfo, RawRefente};
use crate::domain::types::{
    MAX_CALES_PERFO, MAX_COULEURS_CLICHE, MAX_LAIZES_REFENTE, MAX_POSES_CLICHE,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::LigneBrute;

pub struct FieldMapper;

impl FieldMapper {
    // ==========================================
    // 行映射
    // ==========================================

    pub fn map_bobine_mere(&self, ligne: &LigneBrute) -> ImportResult<RawBobineMere> {
        Ok(RawBobineMere {
            code: self.require_code(ligne)?,
            laize: self.parse_f64(ligne, "laize")?,
            grammage: self.parse_f64(ligne, "grammage")?,
            couleur_papier: self.get_string(ligne, "couleur_papier"),
            sommeil: self.parse_bool(ligne, "sommeil")?.unwrap_or(false),
        })
    }

    pub fn map_bobine_fille(&self, ligne: &LigneBrute) -> ImportResult<RawBobineFille> {
        Ok(RawBobineFille {
            code: self.require_code(ligne)?,
            laize: self.parse_f64(ligne, "laize")?,
            grammage: self.parse_f64(ligne, "grammage")?,
            couleur_papier: self.get_string(ligne, "couleur_papier"),
            sommeil: self.parse_bool(ligne, "sommeil")?.unwrap_or(false),
            code_cliche_1: self.get_string(ligne, "code_cliche_1"),
            code_cliche_2: self.get_string(ligne, "code_cliche_2"),
        })
    }

    pub fn map_cliche(&self, ligne: &LigneBrute) -> ImportResult<RawCliche> {
        let mut poses = [None; MAX_POSES_CLICHE];
        for (i, pose) in poses.iter_mut().enumerate() {
            *pose = self.parse_i32(ligne, &format!("pose_{}", i + 1))?;
        }

        let mut couleurs: [Option<String>; MAX_COULEURS_CLICHE] = Default::default();
        for (i, couleur) in couleurs.iter_mut().enumerate() {
            *couleur = self.get_string(ligne, &format!("couleur_{}", i + 1));
        }

        Ok(RawCliche {
            code: self.require_code(ligne)?,
            poses,
            couleurs,
            importance_ordre_couleurs: self.parse_bool(ligne, "importance_ordre_couleurs")?,
        })
    }

    pub fn map_perfo(&self, ligne: &LigneBrute) -> ImportResult<RawPerfo> {
        let mut cales = [None; MAX_CALES_PERFO];
        let mut bagues = [None; MAX_CALES_PERFO];
        for i in 0..MAX_CALES_PERFO {
            cales[i] = self.parse_f64(ligne, &format!("cale_{}", i + 1))?;
            bagues[i] = self.parse_f64(ligne, &format!("bague_{}", i + 1))?;
        }

        Ok(RawPerfo {
            code: self.require_code(ligne)?,
            cales,
            bagues,
            sommeil: self.parse_bool(ligne, "sommeil")?.unwrap_or(false),
        })
    }

    pub fn map_refente(&self, ligne: &LigneBrute) -> ImportResult<RawRefente> {
        let mut laizes = [None; MAX_LAIZES_REFENTE];
        for (i, laize) in laizes.iter_mut().enumerate() {
            *laize = self.parse_f64(ligne, &format!("laize_{}", i + 1))?;
        }

        Ok(RawRefente {
            code: self.require_code(ligne)?,
            code_perfo: self.get_string(ligne, "code_perfo"),
            laizes,
            chute: self.parse_f64(ligne, "chute")?,
            sommeil: self.parse_bool(ligne, "sommeil")?.unwrap_or(false),
        })
    }

    // ==========================================
    // 单元格读取
    // ==========================================

    /// 提取字符串字段, 支持多个可能的列名 (别名)
    fn get_string(&self, ligne: &LigneBrute, key: &str) -> Option<String> {
        let compact = key.replace('_', "");
        let spaced = key.replace('_', " ");
        let mut aliases: Vec<&str> = match key {
            "code" => vec!["code", "ref", "reference"],
            "couleur_papier" => vec!["couleur_papier", "couleur"],
            "sommeil" => vec!["sommeil", "en_sommeil"],
            "code_perfo" => vec!["code_perfo", "perfo"],
            "importance_ordre_couleurs" => vec!["importance_ordre_couleurs", "ordre_couleurs"],
            _ => vec![key],
        };
        // pose_1 / pose1 / "pose 1" 均可
        aliases.push(&compact);
        aliases.push(&spaced);

        for alias in aliases {
            if let Some(v) = ligne.champs.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    fn require_code(&self, ligne: &LigneBrute) -> ImportResult<String> {
        self.get_string(ligne, "code")
            .ok_or_else(|| ImportError::FieldMappingError {
                row: ligne.numero,
                message: "标识列 code 为空".to_string(),
            })
    }

    /// 解析浮点数 (接受逗号小数点)
    fn parse_f64(&self, ligne: &LigneBrute, key: &str) -> ImportResult<Option<f64>> {
        match self.get_string(ligne, key) {
            None => Ok(None),
            Some(value) => value
                .replace(',', ".")
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ImportError::TypeConversionError {
                    row: ligne.numero,
                    field: key.to_string(),
                    message: format!("无法解析为浮点数: {}", value),
                }),
        }
    }

    /// 解析整数
    fn parse_i32(&self, ligne: &LigneBrute, key: &str) -> ImportResult<Option<i32>> {
        match self.get_string(ligne, key) {
            None => Ok(None),
            Some(value) => {
                value
                    .parse::<i32>()
                    .map(Some)
                    .map_err(|_| ImportError::TypeConversionError {
                        row: ligne.numero,
                        field: key.to_string(),
                        message: format!("无法解析为整数: {}", value),
                    })
            }
        }
    }

    /// 解析布尔值 (1/0, Y/N, TRUE/FALSE, OUI/NON)
    fn parse_bool(&self, ligne: &LigneBrute, key: &str) -> ImportResult<Option<bool>> {
        match self.get_string(ligne, key) {
            None => Ok(None),
            Some(value) => match value.to_uppercase().as_str() {
                "1" | "Y" | "TRUE" | "OUI" => Ok(Some(true)),
                "0" | "N" | "FALSE" | "NON" => Ok(Some(false)),
                _ => Err(ImportError::TypeConversionError {
                    row: ligne.numero,
                    field: key.to_string(),
                    message: format!("无法解析为布尔值: {}", value),
                }),
            },
        }
    }
}
