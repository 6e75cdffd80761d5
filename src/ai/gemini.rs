use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::error::Error;

const MODEL: &str = "gemini-1.5-flash";

/// Send one prompt to Gemini and return the raw completion text.
pub fn complete(config: &AppConfig, prompt: &str) -> Result<String, Error> {
    if config.gemini_api_key.is_empty() {
        return Err(Error::Configuration("Gemini API key".to_string()));
    }

    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
        MODEL, config.gemini_api_key
    );

    let body = json!({
        "contents": [{"parts": [{"text": prompt}]}]
    });

    let client = super::http_client(120)?;

    let resp = client
        .post(&url)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .map_err(|e| Error::Provider(format!("Gemini request failed: {}", e)))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().unwrap_or_default();
        return Err(Error::Provider(format!(
            "Gemini returned {}: {}",
            status, text
        )));
    }

    let json: Value = resp
        .json()
        .map_err(|e| Error::Provider(format!("Gemini JSON parse error: {}", e)))?;

    let text = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .unwrap_or("")
        .to_string();

    Ok(text)
}
