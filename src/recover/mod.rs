//! Best-effort recovery of structured JSON from LLM free-text responses.
//!
//! Completion providers are asked for valid JSON but routinely return it
//! wrapped in markdown fences, with bareword keys, smart quotes, citation
//! markers, or trailing commas. `sanitize` rewrites the text so a strict
//! decoder can cope; `extract` locates the candidate object; `parse` decodes
//! it. A decode failure after sanitization is final; nothing downstream
//! patches or retries.

mod extract;
mod sanitize;

pub use extract::{extract, parse};
pub use sanitize::sanitize;
