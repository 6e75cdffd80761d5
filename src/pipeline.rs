use chrono::Utc;
use log::{debug, error, warn};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use crate::error::Error;
use crate::recover;
use crate::schema::{self, FieldSpec};

/// Side channel for raw provider payloads that defeated recovery. Files are
/// keyed by stage and UTC timestamp so a misbehaving upstream model can be
/// debugged offline. Writes are best-effort and never block the error
/// response.
pub struct FailureSink {
    dir: PathBuf,
}

impl FailureSink {
    pub fn new(dir: &str) -> Self {
        FailureSink {
            dir: PathBuf::from(dir),
        }
    }

    pub fn persist(&self, stage: &str, raw: &str) {
        let name = format!("{}-{}.txt", stage, Utc::now().format("%Y%m%dT%H%M%S%3f"));
        let path = self.dir.join(name);
        match fs::write(&path, raw) {
            Ok(_) => warn!("Saved unrecoverable provider response to {}", path.display()),
            Err(e) => error!("Failed to persist provider response ({}): {}", stage, e),
        }
    }
}

/// The canonical recovery pipeline every recommendation-type endpoint runs:
/// sanitize the raw completion, extract and decode the candidate object,
/// validate it against the endpoint's `FieldSpec`, then normalize
/// shape-ambiguous fields. Any failure is terminal for the request;
/// unparseable payloads are dumped to the failure sink on the way out.
pub fn recover_json(raw: &str, spec: &FieldSpec, failures: &FailureSink) -> Result<Value, Error> {
    debug!("provider raw response: {}", preview(raw, 500));

    let cleaned = recover::sanitize(raw);

    let span = match recover::extract(&cleaned) {
        Ok(span) => span,
        Err(e) => {
            warn!(
                "no JSON object in provider response: {}",
                preview(&cleaned, 300)
            );
            failures.persist("no-json", raw);
            return Err(e);
        }
    };

    let mut doc = match recover::parse(span) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("provider JSON failed to decode: {}", e);
            failures.persist("malformed-json", raw);
            return Err(e);
        }
    };

    schema::validate(&doc, spec)?;

    if spec.normalize_event_locations {
        schema::normalize_event_locations(&mut doc);
    }

    Ok(doc)
}

/// Char-safe prefix for log lines; provider text is full of multibyte
/// punctuation, so byte slicing would panic.
fn preview(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
