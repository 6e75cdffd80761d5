use serde_json::Value;

use crate::error::Error;

/// Locate the candidate JSON object in sanitized text: the leftmost `{`
/// through its structurally matching `}`, found by brace-depth counting so
/// trailing prose after the object is tolerated. Braces inside string
/// literals don't count toward depth. Text with no `{`, or with an object
/// that never closes, yields `NoJsonFound`.
pub fn extract(text: &str) -> Result<&str, Error> {
    let start = text.find('{').ok_or(Error::NoJsonFound)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    Err(Error::NoJsonFound)
}

/// Decode the extracted span with a strict JSON parser. Failure here is
/// fatal for the request: the sanitizer already ran, so nothing retries.
pub fn parse(span: &str) -> Result<Value, Error> {
    serde_json::from_str(span).map_err(|e| Error::MalformedJson(e.to_string()))
}
