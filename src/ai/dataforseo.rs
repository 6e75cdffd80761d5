use serde::Serialize;
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::error::Error;

const API_URL: &str =
    "https://api.dataforseo.com/v3/keywords_data/google/search_volume/live";

/// English / United States, per the DataForSEO location registry.
const LANGUAGE_CODE: &str = "en";
const LOCATION_CODE: u32 = 2840;

#[derive(Debug, Clone, Serialize)]
pub struct KeywordMetrics {
    pub keyword: String,
    pub volume: i64,
    pub cpc: f64,
    pub competition: f64,
}

/// Look up monthly search volume, CPC, and competition for a keyword list.
/// Results come back sorted by volume, highest first.
pub fn search_volume(
    config: &AppConfig,
    keywords: &[String],
) -> Result<Vec<KeywordMetrics>, Error> {
    if config.dataforseo_login.is_empty() || config.dataforseo_password.is_empty() {
        return Err(Error::Configuration("DataForSEO login".to_string()));
    }

    let task = json!([{
        "keywords": keywords,
        "language_code": LANGUAGE_CODE,
        "location_code": LOCATION_CODE
    }]);

    let client = super::http_client(60)?;

    let resp = client
        .post(API_URL)
        .basic_auth(&config.dataforseo_login, Some(&config.dataforseo_password))
        .json(&task)
        .send()
        .map_err(|e| Error::Provider(format!("DataForSEO request failed: {}", e)))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().unwrap_or_default();
        return Err(Error::Provider(format!(
            "DataForSEO returned {}: {}",
            status, text
        )));
    }

    let json: Value = resp
        .json()
        .map_err(|e| Error::Provider(format!("DataForSEO JSON parse error: {}", e)))?;

    let items = json
        .get("tasks")
        .and_then(|t| t.get(0))
        .and_then(|t| t.get("result"))
        .and_then(|r| r.get(0))
        .and_then(|r| r.get("items"))
        .and_then(|i| i.as_array())
        .cloned()
        .unwrap_or_default();

    let mut metrics: Vec<KeywordMetrics> = items
        .iter()
        .filter_map(|item| {
            let keyword = item.get("keyword")?.as_str()?.to_string();
            Some(KeywordMetrics {
                keyword,
                volume: item
                    .get("search_volume")
                    .and_then(|v| v.as_i64())
                    .unwrap_or(0),
                cpc: round2(item.get("cpc").and_then(|v| v.as_f64()).unwrap_or(0.0)),
                competition: round2(
                    item.get("competition")
                        .and_then(|v| v.as_f64())
                        .unwrap_or(0.0),
                ),
            })
        })
        .collect();

    metrics.sort_by(|a, b| b.volume.cmp(&a.volume));
    Ok(metrics)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
