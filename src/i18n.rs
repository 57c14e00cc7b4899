// ==========================================
// 分切/印刷机生产配置引擎 - 国际化 (i18n)
// ==========================================
// 使用 rust-i18n 库, 中文默认, 英文可选
// 覆盖: 排除原因、墨槽不可行、导入错误
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use refente_engine::i18n::t;
/// let msg = t("exclusion.sommeil");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数, 占位符形如 `%{champ}`）
///
/// # 示例
/// ```no_run
/// use refente_engine::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/perfos.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
