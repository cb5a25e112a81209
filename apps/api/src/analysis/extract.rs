//! Isolates the JSON payload inside a free-form model reply.
//!
//! Models wrap JSON in code fences and prose despite being told not to. The
//! scanner walks the text tracking brace depth and string/escape context and
//! returns the first balanced top-level object. The old first-`{`/last-`}`
//! heuristic is kept only as a fallback for replies the scanner cannot
//! balance (e.g. truncated output).

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Returns the first balanced top-level `{...}` span, honoring string and
/// escape context so braces inside string values do not count.
fn find_balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut start = None;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            // Only treat quotes as string delimiters once inside an object;
            // prose before the payload may contain unbalanced quotes.
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = Some(idx);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    // idx is an ASCII byte, so idx + 1 is a char boundary
                    return start.map(|s| &text[s..=idx]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Extracts the single JSON object from a raw provider reply, or `None` when
/// no object-like span exists at all.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let cleaned = strip_code_fences(raw);

    if let Some(object) = find_balanced_object(cleaned) {
        return Some(object);
    }

    // Fallback heuristic: outermost braces, balanced or not. The repair
    // stage decides whether the span is salvageable.
    let first = cleaned.find('{')?;
    let last = cleaned.rfind('}')?;
    if last <= first {
        return None;
    }
    Some(&cleaned[first..=last])
}
