use rocket::serde::json::Json;
use rocket::State;
use serde_json::json;

use crate::ai::{perplexity, prompts};
use crate::config::AppConfig;
use crate::error::{ApiResult, Error};
use crate::pipeline::{self, FailureSink};
use crate::schema::{Field, FieldSpec, Shape};

use super::CampaignRequest;

pub const CONTENT_SPEC: FieldSpec = FieldSpec {
    required: &[
        Field {
            key: "recommendedPlatform",
            shape: Shape::String,
        },
        Field {
            key: "captions",
            shape: Shape::Array,
        },
    ],
    normalize_event_locations: false,
};

#[post("/generate-content", format = "json", data = "<body>")]
pub fn generate_content(
    config: &State<AppConfig>,
    failures: &State<FailureSink>,
    body: Json<CampaignRequest>,
) -> ApiResult {
    let prompt = prompts::content_captions(
        &body.business_name,
        &body.business_description,
        &body.business_goals,
        &body.demographics,
        &body.interests,
        &body.location,
        &body.industry,
    );

    let raw = perplexity::complete(config, &prompt).map_err(Error::into_response)?;

    let doc =
        pipeline::recover_json(&raw, &CONTENT_SPEC, failures).map_err(Error::into_response)?;

    Ok(Json(json!({
        "recommendedPlatform": doc["recommendedPlatform"],
        "captions": doc["captions"],
    })))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![generate_content]
}
