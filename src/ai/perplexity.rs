use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::error::Error;

const API_URL: &str = "https://api.perplexity.ai/chat/completions";
const MODEL: &str = "sonar-pro";

/// Send one prompt to Perplexity and return the raw completion text. The
/// model is asked for JSON but nothing guarantees it; recovery happens
/// downstream.
pub fn complete(config: &AppConfig, prompt: &str) -> Result<String, Error> {
    if config.perplexity_api_key.is_empty() {
        return Err(Error::Configuration("Perplexity API key".to_string()));
    }

    let body = json!({
        "model": MODEL,
        "messages": [{"role": "user", "content": prompt}]
    });

    let client = super::http_client(120)?;

    let resp = client
        .post(API_URL)
        .header(
            "Authorization",
            format!("Bearer {}", config.perplexity_api_key),
        )
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .map_err(|e| Error::Provider(format!("Perplexity request failed: {}", e)))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().unwrap_or_default();
        return Err(Error::Provider(format!(
            "Perplexity returned {}: {}",
            status, text
        )));
    }

    let json: Value = resp
        .json()
        .map_err(|e| Error::Provider(format!("Perplexity JSON parse error: {}", e)))?;

    let text = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .unwrap_or("")
        .to_string();

    Ok(text)
}
