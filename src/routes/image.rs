use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::ai::{prompts, stability};
use crate::config::AppConfig;
use crate::error::{ApiResult, Error};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAdRequest {
    pub campaign_data: Value,
    #[serde(rename = "scriptQA")]
    pub script_qa: HashMap<String, String>,
    pub script: String,
}

#[post("/generate-image-ad", format = "json", data = "<body>")]
pub fn generate_image_ad(config: &State<AppConfig>, body: Json<ImageAdRequest>) -> ApiResult {
    let campaign = &body.campaign_data;
    let business_name = campaign
        .get("businessName")
        .and_then(|v| v.as_str())
        .unwrap_or("the business");
    let description = campaign
        .get("businessDescription")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let goals = match campaign.get("businessGoals") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    // The script Q&A is free-form; fish the campaign facts out of whichever
    // questions mention them.
    let offer = answer_matching(&body.script_qa, &["product", "offer", "service"]);
    let target_audience = answer_matching(&body.script_qa, &["audience", "target"]);
    let cta = answer_matching(&body.script_qa, &["action", "cta", "after seeing the ad"]);
    let seasonal_theme = answer_matching(&body.script_qa, &["season", "promotion", "limited"]);
    let brand_style = answer_matching(
        &body.script_qa,
        &["brand", "style", "color", "logo", "font"],
    );

    let preview: String = body.script.chars().take(120).collect();

    let prompt = prompts::image_ad_visual(
        business_name,
        description,
        &offer,
        &target_audience,
        &goals,
        &cta,
        &seasonal_theme,
        &brand_style,
        &preview,
    );

    let image_url = stability::generate_image(config, &prompt).map_err(Error::into_response)?;

    Ok(Json(json!({ "imageUrl": image_url })))
}

/// First answer whose question mentions any of the given keywords
/// (case-insensitive), or empty.
fn answer_matching(qa: &HashMap<String, String>, keywords: &[&str]) -> String {
    for (question, answer) in qa {
        let q = question.to_lowercase();
        if keywords.iter().any(|k| q.contains(k)) {
            return answer.clone();
        }
    }
    String::new()
}

pub fn routes() -> Vec<rocket::Route> {
    routes![generate_image_ad]
}
