use rocket::serde::json::Json;
use rocket::State;
use serde_json::json;

use crate::ai::{perplexity, prompts};
use crate::config::AppConfig;
use crate::error::{ApiResult, Error};
use crate::pipeline::{self, FailureSink};
use crate::schema::{Field, FieldSpec, Shape};

use super::CampaignRequest;

/// The six sections every recommendation response must carry, plus the
/// nested keys the validator checks inside them.
pub const RECOMMENDATION_SPEC: FieldSpec = FieldSpec {
    required: &[
        Field {
            key: "recommendedPlatforms",
            shape: Shape::Array,
        },
        Field {
            key: "notRecommendedPlatforms",
            shape: Shape::Array,
        },
        Field {
            key: "keywords",
            shape: Shape::Object {
                required_keys: &["globalKeywords", "localKeywords"],
            },
        },
        Field {
            key: "competitors",
            shape: Shape::Array,
        },
        Field {
            key: "strategyTips",
            shape: Shape::Any,
        },
        Field {
            key: "localContext",
            shape: Shape::Object {
                required_keys: &["weatherSummary", "eventsSummary"],
            },
        },
    ],
    normalize_event_locations: true,
};

#[post("/generate-recommendation", format = "json", data = "<body>")]
pub fn generate_recommendation(
    config: &State<AppConfig>,
    failures: &State<FailureSink>,
    body: Json<CampaignRequest>,
) -> ApiResult {
    let prompt = prompts::platform_recommendation(
        &body.business_name,
        &body.business_description,
        &body.business_goals,
        &body.demographics,
        &body.interests,
        &body.location,
        &body.industry,
    );

    let raw = perplexity::complete(config, &prompt).map_err(Error::into_response)?;

    let doc = pipeline::recover_json(&raw, &RECOMMENDATION_SPEC, failures)
        .map_err(Error::into_response)?;

    // Recompose from the validated keys only; anything extra the model
    // volunteered is dropped.
    Ok(Json(json!({
        "recommendedPlatforms": doc["recommendedPlatforms"],
        "notRecommendedPlatforms": doc["notRecommendedPlatforms"],
        "keywords": doc["keywords"],
        "competitors": doc["competitors"],
        "strategyTips": doc["strategyTips"],
        "localContext": doc["localContext"],
    })))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![generate_recommendation]
}
