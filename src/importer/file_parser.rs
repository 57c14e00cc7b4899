// ==========================================
// 分切/印刷机生产配置引擎 - 文件解析器
// ==========================================
// 支持: CSV (持久化协作方的目录导出)
// 输出: 表头 (小写, 去空白) → 单元格 的行映射
// ==========================================

use crate::importer::error::ImportResult;
use csv::ReaderBuilder;
use std::collections::HashMap;

/// 一行原始记录 (附带源文件行号, 表头为第 1 行)
#[derive(Debug, Clone, PartialEq)]
pub struct LigneBrute {
    pub numero: usize,
    pub champs: HashMap<String, String>,
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 解析 CSV 文本
    ///
    /// # 规则
    /// - 首行为表头; 表头统一转小写并去空白
    /// - 单元格去空白; 完全空白的行跳过
    /// - 允许行长度不一致 (缺少的尾列视为空)
    pub fn parse_str(&self, content: &str) -> ImportResult<Vec<LigneBrute>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_lowercase())
            .collect();

        let mut lignes = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let mut champs = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    champs.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if champs.values().all(|v| v.is_empty()) {
                continue;
            }

            lignes.push(LigneBrute {
                numero: idx + 2,
                champs,
            });
        }

        Ok(lignes)
    }
}
