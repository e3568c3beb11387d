//! 模型名称映射表
//!
//! 上层界面展示友好名称，API 调用需要原始模型 id。

use phf::phf_map;

/// 展示名称 → 模型 id
static MODEL_MAPPING: phf::Map<&'static str, &'static str> = phf_map! {
    "Gemini 2.5 Flash (快速高效)" => "gemini-2.5-flash",
    "Gemini 2.5 Pro (深度理解)" => "gemini-2.5-pro",
};

/// 解析模型名称
///
/// 映射表中存在的展示名返回对应的模型 id，
/// 其他输入视为原始模型 id 直接透传。
pub fn resolve_model_id(name: &str) -> &str {
    MODEL_MAPPING.get(name).copied().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_display_name() {
        assert_eq!(
            resolve_model_id("Gemini 2.5 Flash (快速高效)"),
            "gemini-2.5-flash"
        );
        assert_eq!(
            resolve_model_id("Gemini 2.5 Pro (深度理解)"),
            "gemini-2.5-pro"
        );
    }

    #[test]
    fn test_resolve_raw_id_passthrough() {
        assert_eq!(resolve_model_id("gemini-2.5-flash"), "gemini-2.5-flash");
        assert_eq!(resolve_model_id("gemini-3.0-pro-preview"), "gemini-3.0-pro-preview");
    }
}
