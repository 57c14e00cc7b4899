// ==========================================
// 分切/印刷机生产配置引擎 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 不变量违反 (EngineError) / 不可行 (EncrierError) / 计划不一致 (IncoherencePlan)
// ==========================================

use thiserror::Error;

/// 不变量违反: 对当前操作致命, 不影响进程
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 多重集差运算出现负计数 (试图移除从未添加的需求)
    #[error("非法操作: 多重集差运算结果为负 (key={key}, 现有={present}, 扣减={removed})")]
    InvalidOperation {
        key: String,
        present: usize,
        removed: usize,
    },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

/// 墨槽分配不可行 (可预期, 由调用方展示, 不自动重试)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncrierError {
    #[error("无可行的墨槽分配: 颜色类别 {classes} 个, 墨槽 {encriers} 个")]
    Infaisable { classes: usize, encriers: usize },
}

impl EncrierError {
    /// 本地化描述
    pub fn libelle(&self) -> String {
        match self {
            EncrierError::Infaisable { classes, encriers } => crate::i18n::t_with_args(
                "encrier.infaisable",
                &[
                    ("classes", classes.to_string().as_str()),
                    ("encriers", encriers.to_string().as_str()),
                ],
            ),
        }
    }
}

/// 计划中已固定的选择互相矛盾 (调用方绕过 Selectables 时出现)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IncoherencePlan {
    #[error("分切方案 {refente} 的打孔方案与已选 {perfo} 不符")]
    PerfoRefente { perfo: String, refente: String },

    #[error("母卷 {bobine} 宽度 {laize} 与分切总宽 {laize_totale} 不符")]
    LaizeMere {
        bobine: String,
        laize: f64,
        laize_totale: f64,
    },

    #[error("已选子卷无法排入分切方案 {refente} 的条位")]
    Laizes { refente: String },

    #[error("纸质母卷 {bobine} 与子卷 {bobine_fille} 的纸色或克重不符")]
    Papier { bobine: String, bobine_fille: String },

    #[error("没有分切方案能同时兼容计划中已固定的选择")]
    SansRefente,

    #[error(transparent)]
    Encriers(#[from] EncrierError),
}
