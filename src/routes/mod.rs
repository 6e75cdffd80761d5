pub mod content;
pub mod image;
pub mod recommendation;
pub mod script;
pub mod strategy;
pub mod trends;

use serde::Deserialize;

/// The canonical business-profile request shape shared by the endpoints
/// that feed the full profile into a prompt template.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRequest {
    pub business_name: String,
    pub business_description: String,
    pub business_goals: Vec<String>,
    pub demographics: Vec<String>,
    pub interests: Vec<String>,
    pub location: String,
    pub industry: String,
}
