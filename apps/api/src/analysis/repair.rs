//! Best-effort parse of an extracted JSON candidate.
//!
//! Strict parse first. On failure the single tolerated defect, a trailing
//! comma before `}` or `]`, is removed and the parse retried once. Anything
//! still failing is a hard error: speculative character rewriting corrupts
//! legitimate content more often than it saves a reply.

use serde_json::{Map, Value};

/// Parses `candidate` into a JSON object, repairing trailing commas if the
/// strict parse fails. Returns the parse error message on a hard failure.
pub fn parse_with_repair(candidate: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Map<String, Value>>(candidate) {
        Ok(object) => Ok(object),
        Err(_) => {
            let repaired = remove_trailing_commas(candidate);
            serde_json::from_str::<Map<String, Value>>(&repaired).map_err(|e| e.to_string())
        }
    }
}

/// Removes commas that directly precede a closing `}` or `]`, ignoring
/// commas inside string values. Idempotent: valid JSON passes through
/// byte-identical.
pub fn remove_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (idx, &ch) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            out.push(ch);
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            ',' => {
                let next = chars[idx + 1..].iter().find(|c| !c.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(ch);
                }
            }
            _ => out.push(ch),
        }
    }

    out
}
