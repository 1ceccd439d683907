/// Extract the first well-formed JSON object from an LLM reply.
///
/// Replies arrive as bare JSON, JSON inside markdown code fences, or JSON
/// embedded in prose; all three shapes are tried in that order.
pub fn extract_json(s: &str) -> Option<String> {
    // First try: the whole string is valid JSON
    if s.trim().starts_with('{') && serde_json::from_str::<serde_json::Value>(s.trim()).is_ok() {
        return Some(s.trim().to_string());
    }

    // Second try: extract from markdown code block
    if let Ok(re) = regex::Regex::new(r"```(?:json)?\s*\n?([\s\S]*?)\n?```") {
        for cap in re.captures_iter(s) {
            if let Some(m) = cap.get(1) {
                let potential_json = m.as_str().trim();
                if serde_json::from_str::<serde_json::Value>(potential_json).is_ok() {
                    return Some(potential_json.to_string());
                }
            }
        }
    }

    // Third try: balanced-brace scan for an embedded object
    let brace_start = s.find('{')?;
    let mut depth = 0;
    let mut end = brace_start;

    for (i, c) in s[brace_start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    end = brace_start + i + 1;
                    break;
                }
            }
            _ => {}
        }
    }

    if depth == 0 && end > brace_start {
        let potential_json = &s[brace_start..end];
        if serde_json::from_str::<serde_json::Value>(potential_json).is_ok() {
            return Some(potential_json.to_string());
        }
    }

    None
}

/// Strip markdown code-fence markers without requiring the fenced content to
/// be valid on its own. The review enricher parses the remainder itself.
pub fn strip_code_fences(s: &str) -> String {
    s.replace("```json", "").replace("```", "").trim().to_string()
}
