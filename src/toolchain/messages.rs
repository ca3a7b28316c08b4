//! @ai:module:intent Localized (zh-CN) diagnostic templates for toolchain failures
//! @ai:module:layer presentation
//! @ai:module:stateless true

use crate::toolchain::validation::ErrorCategory;

/// @ai:intent Message for a tool absent from PATH
/// @ai:effects pure
pub fn missing(tool_name: &str, doc_url: &str) -> String {
    format!("缺少工具 {tool_name}。请安装后重试 ({doc_url})")
}

/// @ai:intent Message for a tool below its minimum version
/// @ai:effects pure
pub fn outdated(
    tool_name: &str,
    current_version: &str,
    minimum_version: &str,
    doc_url: &str,
) -> String {
    format!(
        "工具 {tool_name} 版本过低 (当前: {current_version}, 最低要求: {minimum_version})。请升级后重试 ({doc_url})"
    )
}

/// @ai:intent Message for a tool lacking the execute bit
/// @ai:effects pure
pub fn permission(tool_name: &str, path: &str, permissions: &str) -> String {
    format!("工具 {tool_name} 位于 {path} 权限不足 (当前: {permissions})。请修复权限后重试。")
}

/// @ai:intent Message for a tool whose version could not be determined
/// @ai:effects pure
pub fn version_unknown(tool_name: &str, doc_url: &str) -> String {
    format!("无法获取工具 {tool_name} 的版本信息。请尝试重新安装 ({doc_url})")
}

/// @ai:intent Line printed when every tool passed
/// @ai:effects pure
pub fn passed(language: &str) -> String {
    format!("✓ 工具链验证通过 (语言: {language})")
}

/// @ai:intent Header printed above the failure sections
/// @ai:effects pure
pub fn failed_header(language: &str) -> String {
    format!("✗ 工具链验证失败 (语言: {language})")
}

/// @ai:intent Section heading for one error category
/// @ai:effects pure
pub fn section_header(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Missing => "缺失的工具:",
        ErrorCategory::Outdated => "版本过低的工具:",
        ErrorCategory::Permission => "权限不足的工具:",
        ErrorCategory::Other => "其他错误:",
    }
}
