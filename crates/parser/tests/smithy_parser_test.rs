//! Integration test for Smithy parser

use smithy_sdk_generator_common::{traits, ShapeId, ShapeType};
use smithy_sdk_generator_parser::{parse_model_file, ModelSummary, SmithyParser};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_parse_weather_model() {
    let model = parse_model_file(&fixture("weather.json")).expect("weather model parses");

    let forecast = model
        .expect_shape(&ShapeId::new("com.example.weather#Forecast"))
        .unwrap();
    assert_eq!(forecast.shape_type, ShapeType::Union);
    assert_eq!(forecast.documentation(), Some("A forecast value"));

    // Declaration order is preserved; sorting is the generator's job
    let names: Vec<&str> = forecast.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["rain", "snapshot", "level"]);
    assert_eq!(
        forecast.member("rain").unwrap().documentation(),
        Some("Chance of rain")
    );
    assert_eq!(
        forecast.member("snapshot").unwrap().target.as_str(),
        "smithy.api#Blob"
    );
}

#[test]
fn test_event_stream_and_error_traits() {
    let model = parse_model_file(&fixture("weather.json")).unwrap();

    let alerts = model
        .expect_shape(&ShapeId::new("com.example.weather#AlertStream"))
        .unwrap();
    assert!(alerts.is_event_stream());

    let throttled = model
        .expect_shape(&ShapeId::new("com.example.weather#ThrottledError"))
        .unwrap();
    assert!(throttled.is_error());

    let radar = model
        .expect_shape(&ShapeId::new("com.example.weather#RadarStream"))
        .unwrap();
    assert_eq!(radar.shape_type, ShapeType::Blob);
    assert!(radar.is_streaming());
}

#[test]
fn test_apply_statement_reaches_member() {
    let model = parse_model_file(&fixture("weather.json")).unwrap();
    let alert = model
        .expect_shape(&ShapeId::new("com.example.weather#Alert"))
        .unwrap();
    assert_eq!(
        alert.member("message").unwrap().documentation(),
        Some("Human readable alert")
    );
}

#[test]
fn test_prelude_targets_resolve() {
    let model = parse_model_file(&fixture("weather.json")).unwrap();
    let input = model
        .expect_shape(&ShapeId::new("com.example.weather#GetForecastInput"))
        .unwrap();

    for member in &input.members {
        assert!(
            model.get_shape(&member.target).is_some(),
            "{} should resolve",
            member.target
        );
    }

    let days = model
        .expect_shape(&input.member("days").unwrap().target)
        .unwrap();
    assert!(days.traits.has_non_null_default());
    assert!(input.member("cityId").unwrap().has_trait(traits::REQUIRED));
}

#[test]
fn test_collections_expose_members() {
    let model = parse_model_file(&fixture("weather.json")).unwrap();

    let list = model
        .expect_shape(&ShapeId::new("com.example.weather#CityIds"))
        .unwrap();
    assert_eq!(list.member("member").unwrap().target.as_str(), "smithy.api#String");

    let map = model
        .expect_shape(&ShapeId::new("com.example.weather#Readings"))
        .unwrap();
    assert_eq!(map.member("key").unwrap().target.as_str(), "smithy.api#String");
    assert_eq!(map.member("value").unwrap().target.as_str(), "smithy.api#Double");
}

#[test]
fn test_model_summary() {
    let parser = SmithyParser::from_file(fixture("weather.json")).unwrap();
    assert_eq!(parser.version(), "2.0");

    let model = parser.parse().unwrap();
    let summary = ModelSummary::from_model(&model);

    assert_eq!(summary.services.len(), 1);
    assert_eq!(summary.count(ShapeType::Union), 2);
    assert_eq!(summary.count(ShapeType::Operation), 2);
    assert_eq!(summary.count(ShapeType::Enum), 1);
    assert_eq!(
        summary.event_streams,
        vec![ShapeId::new("com.example.weather#AlertStream")]
    );
    assert_eq!(model.metadata().len(), 1);
}

#[test]
fn test_parse_invalid_json() {
    let result = SmithyParser::from_json("{ not json");
    assert!(result.is_err());
}

#[test]
fn test_invalid_member_target() {
    let parser = SmithyParser::from_json(
        r#"{
            "smithy": "2.0",
            "shapes": {
                "com.example#Choice": {
                    "type": "union",
                    "members": { "a": { "target": "NoNamespace" } }
                }
            }
        }"#,
    )
    .unwrap();
    assert!(parser.parse().is_err());
}
