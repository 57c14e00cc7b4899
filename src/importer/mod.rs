// ==========================================
// 分切/印刷机生产配置引擎 - 导入层
// ==========================================
// 职责: 外部目录数据导入, 生成原始目录行
// 支持: CSV 目录导出, 内存数据
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod loader;
pub mod source;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, LigneBrute};
pub use source::{CatalogSource, CsvCatalogSource, MemoryCatalogSource};
