#![cfg(test)]

use serde_json::{json, Value};
use std::fs;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::ai::prompts;
use crate::config::AppConfig;
use crate::error::Error;
use crate::pipeline::{self, FailureSink};
use crate::recover::{extract, parse, sanitize};
use crate::routes::content::CONTENT_SPEC;
use crate::routes::recommendation::RECOMMENDATION_SPEC;
use crate::routes::trends::TRENDS_SPEC;
use crate::schema;

static SCRATCH_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fresh scratch directory plus a FailureSink pointing at it. Unique per
/// call so parallel tests never share a dump directory.
fn test_sink() -> (std::path::PathBuf, FailureSink) {
    let id = SCRATCH_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("vega_planner_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).expect("scratch dir");
    let sink = FailureSink::new(dir.to_str().expect("utf-8 temp path"));
    (dir, sink)
}

/// A typically mangled recommendation completion: fenced, bareword keys,
/// single-quoted strings, trailing comma.
const MESSY_RECOMMENDATION: &str = "```json\n{recommendedPlatforms: [{name: 'Instagram', matchScore: 90, rationale: 'fits audience', campaignTypes: ['Video Ads']}], notRecommendedPlatforms: [], keywords: {globalKeywords: ['ads'], localKeywords: ['austin ads']}, competitors: [], strategyTips: ['tip1','tip2','tip3'], localContext: {weatherSummary: 'sunny', eventsSummary: []},}\n```";

// ═══════════════════════════════════════════════════════════
// Sanitizer
// ═══════════════════════════════════════════════════════════

#[test]
fn sanitize_noop_on_valid_json() {
    let valid = r#"{"name": "Acme", "tags": ["a", "b"], "score": 80, "nested": {"ok": true}}"#;
    assert_eq!(sanitize(valid), valid);
}

#[test]
fn sanitize_is_idempotent() {
    let inputs = [
        MESSY_RECOMMENDATION,
        r#"{name: "Acme", matchScore: 80}"#,
        "Reach [1] is high [23]",
        "no json here at all",
        "```\n{\"a\": \"b\"}\n```",
        "{\"a\": \"x\\\\\\\\\"}",
    ];
    for input in inputs {
        let once = sanitize(input);
        let twice = sanitize(&once);
        assert_eq!(once, twice, "sanitize not idempotent for {:?}", input);
    }
}

#[test]
fn sanitize_quotes_bareword_keys() {
    let out = sanitize(r#"{name: "Acme", matchScore: 80}"#);
    let doc: Value = serde_json::from_str(&out).expect("sanitized output parses");
    assert_eq!(doc, json!({"name": "Acme", "matchScore": 80}));
}

#[test]
fn sanitize_leaves_quoted_keys_alone() {
    let input = r#"{"name": "Acme", "matchScore": 80}"#;
    assert_eq!(sanitize(input), input);
}

#[test]
fn sanitize_strips_tagged_fence() {
    assert_eq!(sanitize("```json\n{\"a\": \"b\"}\n```"), "{\"a\": \"b\"}");
}

#[test]
fn sanitize_strips_untagged_fence() {
    assert_eq!(sanitize("```\n{\"a\": \"b\"}\n```"), "{\"a\": \"b\"}");
}

#[test]
fn sanitize_fence_interior_untouched() {
    let fenced = "```json\n{\"text\": \"uses ``` nowhere else\"}\n```";
    let doc: Value = serde_json::from_str(&sanitize(fenced)).expect("parses");
    assert_eq!(doc["text"], "uses ``` nowhere else");
}

#[test]
fn sanitize_removes_citation_markers() {
    assert_eq!(sanitize("Reach [1] is high [23]"), "Reach  is high ");
}

#[test]
fn sanitize_keeps_real_arrays() {
    let input = r#"{"scores": [1, 2, 3]}"#;
    assert_eq!(sanitize(input), input);
}

#[test]
fn sanitize_normalizes_smart_quotes() {
    let input = "{\u{201C}name\u{201D}: \u{201C}Acme\u{201D}}";
    let doc: Value = serde_json::from_str(&sanitize(input)).expect("parses");
    assert_eq!(doc["name"], "Acme");
}

#[test]
fn sanitize_converts_single_quoted_strings() {
    let out = sanitize("{tips: ['tip1','tip2'], platform: 'Instagram'}");
    let doc: Value = serde_json::from_str(&out).expect("parses");
    assert_eq!(doc["tips"], json!(["tip1", "tip2"]));
    assert_eq!(doc["platform"], "Instagram");
}

#[test]
fn sanitize_tolerates_apostrophe_in_single_quoted_string() {
    let out = sanitize("{note: 'it's fine', x: 1}");
    let doc: Value = serde_json::from_str(&out).expect("parses");
    assert_eq!(doc["note"], "it's fine");
    assert_eq!(doc["x"], 1);
}

#[test]
fn sanitize_keeps_apostrophes_in_double_quoted_strings() {
    let input = r#"{"note": "it's already fine"}"#;
    assert_eq!(sanitize(input), input);
}

#[test]
fn sanitize_strips_trailing_commas() {
    let out = sanitize(r#"{"a": [1, 2,], "b": {"c": 3,},}"#);
    let doc: Value = serde_json::from_str(&out).expect("parses");
    assert_eq!(doc, json!({"a": [1, 2], "b": {"c": 3}}));
}

#[test]
fn sanitize_collapses_doubled_quote_escapes() {
    // `\\"` where the model meant a plain `"`.
    let input = "{\"a\": \\\\\"b\\\\\"}";
    assert_eq!(sanitize(input), "{\"a\": \"b\"}");
}

#[test]
fn sanitize_doubled_escape_collapse_reaches_fixpoint() {
    // A four-backslash run collapses in one pass; a second pass changes
    // nothing.
    let input = "{\"a\": \"x\\\\\\\\\"}";
    let once = sanitize(input);
    assert_eq!(once, "{\"a\": \"x\"}");
    assert_eq!(sanitize(&once), once);

    // Odd runs keep the surviving escape.
    assert_eq!(sanitize("{\"a\": \\\\\\\"b\\\\\\\"}"), "{\"a\": \\\"b\\\"}");
}

// ═══════════════════════════════════════════════════════════
// Extraction and decoding
// ═══════════════════════════════════════════════════════════

#[test]
fn extract_fails_without_brace() {
    assert_eq!(extract("no json in this response"), Err(Error::NoJsonFound));
    assert_eq!(extract(""), Err(Error::NoJsonFound));
}

#[test]
fn extract_tolerates_surrounding_prose() {
    let text = "Sure! Here is the JSON you asked for: {\"a\": 1} Hope that helps.";
    assert_eq!(extract(text), Ok("{\"a\": 1}"));
}

#[test]
fn extract_handles_nested_objects() {
    let text = "{\"a\": {\"b\": {\"c\": 1}}} trailing";
    assert_eq!(extract(text), Ok("{\"a\": {\"b\": {\"c\": 1}}}"));
}

#[test]
fn extract_ignores_braces_inside_strings() {
    let text = "prose {\"a\": \"b}\"} more prose";
    assert_eq!(extract(text), Ok("{\"a\": \"b}\"}"));
}

#[test]
fn extract_fails_on_unterminated_object() {
    assert_eq!(extract("{\"a\": 1"), Err(Error::NoJsonFound));
}

#[test]
fn parse_rejects_malformed_span() {
    match parse("{invalid json") {
        Err(Error::MalformedJson(_)) => {}
        other => panic!("expected MalformedJson, got {:?}", other),
    }
}

// ═══════════════════════════════════════════════════════════
// Schema validation
// ═══════════════════════════════════════════════════════════

fn full_recommendation_doc() -> Value {
    json!({
        "recommendedPlatforms": [],
        "notRecommendedPlatforms": [],
        "keywords": {"globalKeywords": [], "localKeywords": []},
        "competitors": [],
        "strategyTips": ["a", "b", "c"],
        "localContext": {"weatherSummary": "sunny", "eventsSummary": []}
    })
}

#[test]
fn validate_accepts_complete_document() {
    assert_eq!(
        schema::validate(&full_recommendation_doc(), &RECOMMENDATION_SPEC),
        Ok(())
    );
}

#[test]
fn validate_reports_missing_top_level_key() {
    let mut doc = full_recommendation_doc();
    doc.as_object_mut().unwrap().remove("strategyTips");
    assert_eq!(
        schema::validate(&doc, &RECOMMENDATION_SPEC),
        Err(Error::MissingField("strategyTips".to_string()))
    );
}

#[test]
fn validate_reports_wrong_shape() {
    let mut doc = full_recommendation_doc();
    doc["keywords"] = json!(["not", "an", "object"]);
    assert_eq!(
        schema::validate(&doc, &RECOMMENDATION_SPEC),
        Err(Error::InvalidShape("keywords".to_string()))
    );
}

#[test]
fn validate_reports_missing_nested_key() {
    let mut doc = full_recommendation_doc();
    doc["localContext"] = json!({"weatherSummary": "sunny"});
    assert_eq!(
        schema::validate(&doc, &RECOMMENDATION_SPEC),
        Err(Error::MissingField("localContext.eventsSummary".to_string()))
    );
}

#[test]
fn validate_rejects_non_object_document() {
    assert_eq!(
        schema::validate(&json!([1, 2, 3]), &RECOMMENDATION_SPEC),
        Err(Error::InvalidShape("document".to_string()))
    );
}

#[test]
fn validate_content_spec_shapes() {
    let ok = json!({"recommendedPlatform": "Instagram", "captions": []});
    assert_eq!(schema::validate(&ok, &CONTENT_SPEC), Ok(()));

    let bad = json!({"recommendedPlatform": ["Instagram"], "captions": []});
    assert_eq!(
        schema::validate(&bad, &CONTENT_SPEC),
        Err(Error::InvalidShape("recommendedPlatform".to_string()))
    );
}

#[test]
fn validate_trends_spec_shapes() {
    assert_eq!(
        schema::validate(&json!({"keywords": ["a", "b"]}), &TRENDS_SPEC),
        Ok(())
    );
    assert_eq!(
        schema::validate(&json!({"keywords": "a, b"}), &TRENDS_SPEC),
        Err(Error::InvalidShape("keywords".to_string()))
    );
}

// ═══════════════════════════════════════════════════════════
// Location normalization
// ═══════════════════════════════════════════════════════════

#[test]
fn location_string_splits_on_first_comma() {
    let loc = schema::normalize_location(&json!("Austin, TX"));
    assert_eq!(loc["street"], "");
    assert_eq!(loc["city"], "Austin");
    assert_eq!(loc["state"], "TX");
    assert_eq!(loc["zip"], "");
}

#[test]
fn location_string_without_comma_is_city_only() {
    let loc = schema::normalize_location(&json!("Austin"));
    assert_eq!(loc["city"], "Austin");
    assert_eq!(loc["state"], "");
}

#[test]
fn location_object_passes_through() {
    let original = json!({"street": "1 Main St", "city": "Austin", "state": "TX", "zip": "78701"});
    assert_eq!(schema::normalize_location(&original), original);
}

#[test]
fn maps_link_synthesized_with_encoded_address() {
    let mut loc = schema::normalize_location(&json!("Austin, TX"));
    schema::ensure_maps_link(loc.as_object_mut().unwrap());

    let link = loc["mapsLink"].as_str().unwrap();
    assert!(link.starts_with("https://www.google.com/maps/dir/?"));
    assert!(link.contains("api=1"));
    assert!(link.contains("Austin%2C%20TX"), "link was {}", link);
}

#[test]
fn maps_link_not_overwritten() {
    let mut doc = json!({
        "localContext": {"eventsSummary": [{
            "name": "Expo",
            "location": {
                "street": "", "city": "Austin", "state": "TX", "zip": "",
                "mapsLink": "https://example.com/venue"
            }
        }]}
    });
    schema::normalize_event_locations(&mut doc);
    assert_eq!(
        doc["localContext"]["eventsSummary"][0]["location"]["mapsLink"],
        "https://example.com/venue"
    );
}

#[test]
fn event_locations_normalized_from_strings() {
    let mut doc = json!({
        "localContext": {"eventsSummary": [
            {"name": "Expo", "location": "Austin, TX"},
            {"name": "Fair"}
        ]}
    });
    schema::normalize_event_locations(&mut doc);

    let expo = &doc["localContext"]["eventsSummary"][0]["location"];
    assert_eq!(expo["city"], "Austin");
    assert!(expo["mapsLink"].as_str().unwrap().contains("Austin"));

    // An event with no location at all still gets the structured shape.
    let fair = &doc["localContext"]["eventsSummary"][1]["location"];
    assert_eq!(fair["city"], "");
    assert!(fair["mapsLink"].as_str().unwrap().starts_with("https://"));
}

#[test]
fn event_location_normalization_is_idempotent() {
    let mut doc = json!({
        "localContext": {"eventsSummary": [{"name": "Expo", "location": "Austin, TX"}]}
    });
    schema::normalize_event_locations(&mut doc);
    let once = doc.clone();
    schema::normalize_event_locations(&mut doc);
    assert_eq!(doc, once);
}

// ═══════════════════════════════════════════════════════════
// Recovery pipeline end to end
// ═══════════════════════════════════════════════════════════

#[test]
fn pipeline_recovers_messy_recommendation() {
    let (dir, sink) = test_sink();

    let doc = pipeline::recover_json(MESSY_RECOMMENDATION, &RECOMMENDATION_SPEC, &sink)
        .expect("messy payload recovers");

    assert_eq!(doc["recommendedPlatforms"][0]["name"], "Instagram");
    assert_eq!(doc["recommendedPlatforms"][0]["matchScore"], 90);
    assert_eq!(
        doc["recommendedPlatforms"][0]["campaignTypes"],
        json!(["Video Ads"])
    );
    assert_eq!(doc["keywords"]["localKeywords"], json!(["austin ads"]));
    assert_eq!(doc["strategyTips"], json!(["tip1", "tip2", "tip3"]));
    assert_eq!(doc["localContext"]["weatherSummary"], "sunny");

    // Nothing failed, so nothing was dumped.
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn pipeline_rejects_and_persists_braceless_text() {
    let (dir, sink) = test_sink();

    let result = pipeline::recover_json(
        "I'm sorry, I can't produce that report.",
        &RECOMMENDATION_SPEC,
        &sink,
    );
    assert_eq!(result, Err(Error::NoJsonFound));

    let dumps: Vec<_> = fs::read_dir(&dir).unwrap().collect();
    assert_eq!(dumps.len(), 1);
    let name = dumps[0].as_ref().unwrap().file_name();
    assert!(name.to_string_lossy().starts_with("no-json-"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn pipeline_rejects_and_persists_undecodable_span() {
    let (dir, sink) = test_sink();

    // An unquoted value token defeats every rewrite; the decoder gives up.
    let result = pipeline::recover_json("{\"a\": definitely not json}", &TRENDS_SPEC, &sink);
    match result {
        Err(Error::MalformedJson(_)) => {}
        other => panic!("expected MalformedJson, got {:?}", other),
    }

    let dumps: Vec<_> = fs::read_dir(&dir).unwrap().collect();
    assert_eq!(dumps.len(), 1);
    let name = dumps[0].as_ref().unwrap().file_name();
    assert!(name.to_string_lossy().starts_with("malformed-json-"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn pipeline_validation_failure_is_terminal() {
    let (dir, sink) = test_sink();

    let result = pipeline::recover_json("{\"keywordz\": [\"oops\"]}", &TRENDS_SPEC, &sink);
    assert_eq!(result, Err(Error::MissingField("keywords".to_string())));
    let _ = fs::remove_dir_all(&dir);
}

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

#[test]
fn error_messages_name_the_offender() {
    assert_eq!(
        Error::MissingField("strategyTips".to_string()).to_string(),
        "Missing key: strategyTips"
    );
    assert_eq!(
        Error::InvalidShape("keywords".to_string()).to_string(),
        "Invalid shape for field: keywords"
    );
    assert_eq!(
        Error::Configuration("Perplexity API key".to_string()).to_string(),
        "Missing Perplexity API key credential"
    );
    assert_eq!(
        Error::NoJsonFound.to_string(),
        "No valid JSON found in provider response"
    );
}

// ═══════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════

fn empty_config() -> AppConfig {
    AppConfig {
        perplexity_api_key: String::new(),
        gemini_api_key: String::new(),
        stability_api_key: String::new(),
        dataforseo_login: String::new(),
        dataforseo_password: String::new(),
        allowed_origins: vec![],
        failure_dir: "failures".to_string(),
    }
}

#[test]
fn missing_credentials_lists_every_empty_one() {
    assert_eq!(
        empty_config().missing_credentials(),
        vec![
            "PERPLEXITY_API_KEY",
            "GEMINI_API_KEY",
            "STABILITY_API_KEY",
            "DFSEO_LOGIN",
            "DFSEO_PASSWORD",
        ]
    );
}

#[test]
fn missing_credentials_empty_when_all_set() {
    let mut config = empty_config();
    config.perplexity_api_key = "pk".to_string();
    config.gemini_api_key = "gk".to_string();
    config.stability_api_key = "sk".to_string();
    config.dataforseo_login = "user".to_string();
    config.dataforseo_password = "pass".to_string();
    assert!(config.missing_credentials().is_empty());
}

// ═══════════════════════════════════════════════════════════
// Prompts
// ═══════════════════════════════════════════════════════════

#[test]
fn recommendation_prompt_includes_profile_and_sections() {
    let prompt = prompts::platform_recommendation(
        "Tortilleria Azul",
        "Fresh tortillas daily",
        &["Foot traffic".to_string()],
        &["25-40".to_string()],
        &["food".to_string()],
        "Austin, TX",
        "Food & Beverage",
    );
    assert!(prompt.contains("Tortilleria Azul"));
    assert!(prompt.contains("Austin, TX"));
    assert!(prompt.contains("\"recommendedPlatforms\""));
    assert!(prompt.contains("\"localContext\""));
    assert!(prompt.contains("Return valid JSON only."));
}

#[test]
fn trends_prompt_asks_for_json_keyword_list() {
    let prompt = prompts::trending_keywords("Acme", "Widgets", "Manufacturing", "Dayton, OH");
    assert!(prompt.contains("top 20"));
    assert!(prompt.contains("\"keywords\""));
    assert!(prompt.contains("Acme"));
}

#[test]
fn video_script_prompt_carries_scene_inputs() {
    let prompt = prompts::video_ad_script(
        "Instagram",
        "breakfast tacos",
        "Tortilleria Azul",
        "Austin, TX",
        "sunrise over the kitchen",
        "sunny",
        "2",
        "warm",
        "fresh tortillas",
        "Order today",
        "[\"25-40\"]",
        "Fresh tortillas daily",
    );
    assert!(prompt.contains("10-second commercial script for Instagram"));
    assert!(prompt.contains("breakfast tacos"));
    assert!(prompt.contains("Scene Start: sunrise over the kitchen"));
    assert!(prompt.contains("Return only the script as plain text."));
}
