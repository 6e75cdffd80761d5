use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::json;

use crate::ai::{dataforseo, gemini, prompts};
use crate::config::AppConfig;
use crate::error::{ApiResult, Error};
use crate::pipeline::{self, FailureSink};
use crate::schema::{Field, FieldSpec, Shape};

pub const TRENDS_SPEC: FieldSpec = FieldSpec {
    required: &[Field {
        key: "keywords",
        shape: Shape::Array,
    }],
    normalize_event_locations: false,
};

/// Volume lookups are billed per keyword, so only the head of the model's
/// list goes to the data provider.
const MAX_KEYWORDS: usize = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRequest {
    pub business_name: String,
    pub business_description: String,
    pub industry: String,
    pub location: String,
}

#[post("/market-trends", format = "json", data = "<body>")]
pub fn market_trends(
    config: &State<AppConfig>,
    failures: &State<FailureSink>,
    body: Json<TrendRequest>,
) -> ApiResult {
    let prompt = prompts::trending_keywords(
        &body.business_name,
        &body.business_description,
        &body.industry,
        &body.location,
    );

    let raw = gemini::complete(config, &prompt).map_err(Error::into_response)?;

    let doc = pipeline::recover_json(&raw, &TRENDS_SPEC, failures).map_err(Error::into_response)?;

    let keywords: Vec<String> = doc["keywords"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .take(MAX_KEYWORDS)
                .collect()
        })
        .unwrap_or_default();

    log::info!("trend keywords selected for volume lookup: {:?}", keywords);

    let metrics = dataforseo::search_volume(config, &keywords).map_err(Error::into_response)?;

    Ok(Json(json!({ "keywords": metrics })))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![market_trends]
}
