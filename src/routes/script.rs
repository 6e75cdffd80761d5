use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::ai::{perplexity, prompts};
use crate::config::AppConfig;
use crate::error::{ApiResult, Error};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRequest {
    pub platform: String,
    pub ad_type: String,
    pub tone: String,
    pub topic: String,
    pub keyword: String,
    pub cta: String,
    pub length: Option<String>,
    pub scene_start: Option<String>,
    pub weather: Option<String>,
    pub num_characters: Option<String>,
    pub main_product: Option<String>,
    // Kept so clients can round-trip them into the editing step.
    pub contact_number: Option<String>,
    pub website: Option<String>,
    pub campaign_data: Value,
}

#[post("/generate-script", format = "json", data = "<body>")]
pub fn generate_script(config: &State<AppConfig>, body: Json<ScriptRequest>) -> ApiResult {
    let business = &body.campaign_data;
    let business_name = business
        .get("businessName")
        .and_then(|v| v.as_str())
        .unwrap_or("the business");
    let description = business
        .get("businessDescription")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let audience = business
        .get("demographics")
        .map(|v| v.to_string())
        .unwrap_or_else(|| "[]".to_string());
    let city_state = city_state(business.get("location"));

    let prompt = if body.ad_type == "Video Ad" {
        prompts::video_ad_script(
            &body.platform,
            body.main_product.as_deref().unwrap_or(""),
            business_name,
            &city_state,
            body.scene_start.as_deref().unwrap_or(""),
            body.weather.as_deref().unwrap_or(""),
            body.num_characters.as_deref().unwrap_or(""),
            &body.tone,
            &body.keyword,
            &body.cta,
            &audience,
            description,
        )
    } else {
        prompts::image_ad_caption(
            &body.platform,
            business_name,
            description,
            &audience,
            &city_state,
            &body.topic,
            &body.keyword,
            &body.tone,
            &body.cta,
        )
    };

    let script = perplexity::complete(config, &prompt).map_err(Error::into_response)?;

    Ok(Json(json!({ "script": script.trim() })))
}

/// Campaign data may carry the location as free text or as a structured
/// object; both collapse to "City, ST" for the prompt.
fn city_state(location: Option<&Value>) -> String {
    match location {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(obj)) => {
            let city = obj.get("city").and_then(|v| v.as_str()).unwrap_or("");
            let state = obj.get("state").and_then(|v| v.as_str()).unwrap_or("");
            format!("{}, {}", city, state)
        }
        _ => String::new(),
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![generate_script]
}
