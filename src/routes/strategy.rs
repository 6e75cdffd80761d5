use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRequest {
    pub business_goals: Vec<String>,
    pub demographics: Vec<String>,
    pub interests: Vec<String>,
    pub location: String,
    pub budget: String,
    pub timeline: String,
    pub industry: String,
}

/// The one endpoint with no provider call: a deterministic summary of the
/// submitted campaign profile.
#[post("/generate-strategy", format = "json", data = "<body>")]
pub fn generate_strategy(body: Json<StrategyRequest>) -> ApiResult {
    if body.business_goals.is_empty() {
        return Err(status::Custom(
            Status::BadRequest,
            Json(json!({ "error": "Business goals are required" })),
        ));
    }

    let lead_goals = body
        .business_goals
        .iter()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    let blueprint = format!(
        "We will launch a {} marketing campaign targeting {} with an emphasis on {}. Budget: ${}/mo for {}.",
        body.industry.to_lowercase(),
        body.demographics.join(", "),
        lead_goals,
        body.budget,
        body.timeline,
    );

    Ok(Json(json!({
        "message": "Strategy generated successfully",
        "summary": {
            "Goals": body.business_goals,
            "Target Audience": {
                "Demographics": body.demographics,
                "Interests": body.interests,
                "Location": body.location,
            },
            "Budget": format!("${}/month", body.budget),
            "Timeline": body.timeline,
            "Industry": body.industry,
            "Blueprint": blueprint,
        }
    })))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![generate_strategy]
}
