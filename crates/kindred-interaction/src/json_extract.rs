/// Returns the substring from the first `{` to the last `}` inclusive.
///
/// Models wrap their JSON in prose or markdown fences; everything outside
/// the outermost braces is ignored. No validation happens here.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_from_prose() {
        let text = "Here is the result: {\"character\":\"X\"} Thanks!";
        assert_eq!(extract_json_object(text), Some("{\"character\":\"X\"}"));
    }

    #[test]
    fn test_extracts_from_markdown_fence() {
        let text = "```json\n{\n  \"question\": \"Why?\"\n}\n```";
        assert_eq!(extract_json_object(text), Some("{\n  \"question\": \"Why?\"\n}"));
    }

    #[test]
    fn test_spans_nested_objects() {
        let text = "x {\"a\": {\"b\": 1}} y";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_no_braces() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("only { open"), None);
        assert_eq!(extract_json_object("} reversed {"), None);
    }
}
