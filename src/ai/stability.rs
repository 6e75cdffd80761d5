use serde_json::Value;

use crate::config::AppConfig;
use crate::error::Error;

const API_URL: &str = "https://api.stability.ai/v2beta/stable-image/generate/core";
const MODEL: &str = "stable-diffusion-xl-1024-v1-0";

/// Generate one square ad image from a visual prompt. Returns the image
/// reference the provider hands back.
pub fn generate_image(config: &AppConfig, prompt: &str) -> Result<String, Error> {
    if config.stability_api_key.is_empty() {
        return Err(Error::Configuration("Stability API key".to_string()));
    }

    let form = reqwest::blocking::multipart::Form::new()
        .text("prompt", prompt.trim().to_string())
        .text("model", MODEL)
        .text("output_format", "png")
        .text("aspect_ratio", "1:1");

    let client = super::http_client(120)?;

    let resp = client
        .post(API_URL)
        .header(
            "Authorization",
            format!("Bearer {}", config.stability_api_key),
        )
        .header("Accept", "application/json")
        .multipart(form)
        .send()
        .map_err(|e| Error::Provider(format!("Stability request failed: {}", e)))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().unwrap_or_default();
        return Err(Error::Provider(format!(
            "Stability API returned {}: {}",
            status, text
        )));
    }

    let json: Value = resp
        .json()
        .map_err(|e| Error::Provider(format!("Stability JSON parse error: {}", e)))?;

    json.get("image")
        .and_then(|v| v.as_str())
        .map(String::from)
        .ok_or_else(|| Error::Provider("No image URL returned from Stability AI".to_string()))
}
