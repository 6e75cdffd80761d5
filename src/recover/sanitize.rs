use regex::Regex;
use std::sync::OnceLock;

/// Rewrite near-JSON provider text into something a strict decoder can
/// parse. Never fails: each transform is a pure string rewrite, applied at
/// most once, in a fixed order that later steps depend on. Every transform
/// is idempotent and a no-op on already well-formed JSON.
pub fn sanitize(raw: &str) -> String {
    let mut text = strip_code_fence(raw);
    text = strip_citation_markers(&text);
    text = normalize_smart_quotes(&text);
    text = normalize_single_quoted_strings(&text);
    text = quote_bareword_keys(&text);
    text = strip_trailing_commas(&text);
    collapse_doubled_quote_escapes(&text)
}

/// Strip a single leading/trailing triple-backtick fence, optionally
/// tagged ("```json"). Only the fence markers and surrounding whitespace
/// are removed; interior content is untouched.
fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    let inner = match trimmed
        .strip_prefix("```")
        .and_then(|s| s.strip_suffix("```"))
    {
        Some(inner) => inner,
        None => return text.to_string(),
    };

    // The opening fence line may carry a language tag; drop that line when
    // it holds nothing but the tag.
    let inner = inner
        .split_once('\n')
        .filter(|(tag, _)| tag.trim().chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|(_, body)| body)
        .unwrap_or(inner);

    inner.trim().to_string()
}

fn citation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[\d+\]").expect("citation pattern compiles"))
}

/// Remove bracketed numeric citation markers like `[1]`, an artifact of
/// providers that footnote their sources. Digit-only bracket content only;
/// real arrays are untouched.
fn strip_citation_markers(text: &str) -> String {
    citation_re().replace_all(text, "").into_owned()
}

/// Normalize the four smart-quote code points to their ASCII equivalents.
fn normalize_smart_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            c => c,
        })
        .collect()
}

/// Convert single-quoted strings in value or key position to double-quoted
/// ones. Only quotes that open right after a structural character (`{`,
/// `[`, `,`, `:`) and close right before one are considered, which keeps
/// apostrophes inside double-quoted strings and ordinary prose intact.
fn normalize_single_quoted_strings(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_double = false;
    let mut prev_sig = '\0';
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if in_double {
            out.push(c);
            if c == '\\' && i + 1 < chars.len() {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if c == '"' {
                in_double = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_double = true;
                out.push(c);
                prev_sig = c;
                i += 1;
            }
            '\'' if matches!(prev_sig, '{' | '[' | ',' | ':') => {
                match closing_single_quote(&chars, i + 1) {
                    Some(end) => {
                        out.push('"');
                        for &sc in &chars[i + 1..end] {
                            if sc == '"' {
                                out.push('\\');
                            }
                            out.push(sc);
                        }
                        out.push('"');
                        prev_sig = '"';
                        i = end + 1;
                    }
                    None => {
                        out.push(c);
                        prev_sig = c;
                        i += 1;
                    }
                }
            }
            _ => {
                out.push(c);
                if !c.is_whitespace() {
                    prev_sig = c;
                }
                i += 1;
            }
        }
    }

    out
}

/// Find the single quote that ends a candidate string: the next `'` whose
/// following significant character continues JSON structure. Skipping
/// quotes that don't qualify tolerates apostrophes inside the string.
fn closing_single_quote(chars: &[char], from: usize) -> Option<usize> {
    for j in from..chars.len() {
        if chars[j] != '\'' {
            continue;
        }
        match chars[j + 1..].iter().find(|c| !c.is_whitespace()) {
            Some(&next) if matches!(next, ',' | ':' | ']' | '}') => return Some(j),
            None => return Some(j),
            _ => {}
        }
    }
    None
}

fn bareword_key_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)(\s*):").expect("bareword pattern compiles")
    })
}

/// Wrap bareword object keys in double quotes. The pattern requires the
/// token to sit directly between `{` or `,` and a `:`, so already-quoted
/// keys never match a second time.
fn quote_bareword_keys(text: &str) -> String {
    bareword_key_re()
        .replace_all(text, "$1\"$2\"$3:")
        .into_owned()
}

fn trailing_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*([}\]])").expect("trailing comma pattern compiles"))
}

/// Remove trailing commas immediately before a closing `}` or `]`.
fn strip_trailing_commas(text: &str) -> String {
    trailing_comma_re().replace_all(text, "$1").into_owned()
}

/// Collapse the doubled-escape artifact `\\"` back to a plain quote.
/// Each run of backslashes before a quote is consumed whole and reduced
/// by pairs, so a single pass reaches the fixpoint and re-running changes
/// nothing. Best-effort and deliberately last: a string value that
/// legitimately ends in an escaped backslash is a known false positive.
fn collapse_doubled_quote_escapes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i] == '\\' {
            i += 1;
        }
        let run = i - start;
        let keep = if i < chars.len() && chars[i] == '"' && run >= 2 {
            run % 2
        } else {
            run
        };
        for _ in 0..keep {
            out.push('\\');
        }
    }

    out
}
