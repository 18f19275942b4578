/// Best-effort cleanup of model-produced JSON. Model output is
/// adversarial: wrapped in markdown fences, followed by prose, truncated
/// mid-structure, sprinkled with trailing commas. The four steps run
/// unconditionally and in this order — later steps assume the earlier
/// ones already ran (truncation only works once the fence is gone).
/// The result is a candidate, not a guarantee: the caller still parses
/// and handles failure.
pub fn repair_json(raw: &str) -> String {
    let mut text = strip_code_fence(raw.trim()).to_string();

    // Drop any prose the model appended after the last complete object.
    if let Some(last_brace) = text.rfind('}') {
        text.truncate(last_brace + 1);
    }

    let text = strip_trailing_commas(&text);
    collapse_whitespace(&text)
}

/// Strip a leading ``` or ```json fence (and its closing fence, when
/// present). Only applies when the fence opens the text, matching how
/// models wrap whole-response JSON.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    for fence in ["```json", "```"] {
        if let Some(rest) = text.strip_prefix(fence) {
            let rest = rest.trim_start();
            return match rest.rfind("```") {
                Some(end) => rest[..end].trim_end(),
                None => rest,
            };
        }
    }
    text
}

/// Remove commas immediately preceding `}` or `]` (ignoring whitespace).
/// Strict parsers reject them; models emit them constantly.
fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Collapse newlines, carriage returns, tabs, and whitespace runs to
/// single spaces.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out.trim().to_string()
}
