//! Shared helpers for LLM-backed services

pub mod prompt_builder;

/// Strip leading/trailing markdown code-fence markers from a model
/// reply before parsing it as JSON. Models asked for strict JSON still
/// frequently wrap it in ```json ... ``` fences.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").or_else(|| rest.strip_prefix("JSON")).unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_json_fence() {
        let raw = "```json\n{\"title\": \"The Sleepy Fox\"}\n```";
        assert_eq!(strip_code_fences(raw), "{\"title\": \"The Sleepy Fox\"}");
    }

    #[test]
    fn test_strips_bare_fence() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_unfenced_text_is_trimmed_only() {
        assert_eq!(strip_code_fences("  {\"a\": 1} \n"), "{\"a\": 1}");
    }
}
