// Unit tests for the report model (serialization and step ordering).

use crate::{ErrorCategory, ModelDescriptor, ProbeReport, Step, StepKind};

fn descriptor(name: &str) -> ModelDescriptor {
    ModelDescriptor {
        name: name.to_string(),
        display_name: String::from("Display"),
        description: String::new(),
        supported_generation_methods: vec![String::from("generateContent")],
        input_token_limit: Some(1_000_000),
        output_token_limit: Some(8192),
    }
}

/// **VALUE**: Verifies the report serializes to JSON.
///
/// **WHY THIS MATTERS**: A web presentation layer consumes the report as
/// JSON. If serialization breaks, every non-CLI frontend is broken.
///
/// **BUG THIS CATCHES**: Would catch a non-serializable field slipping
/// into the report (e.g. the raw key instead of the masked string).
#[test]
fn given_populated_report_when_serialized_then_succeeds() {
    // GIVEN: A report with every field populated
    let mut report = ProbeReport::new(String::from("AIzaSyDe****jklm"));
    report.success = false;
    report.category = Some(ErrorCategory::InvalidCredential);
    report.error_message = Some(String::from("API_KEY_INVALID: key not found"));
    report.status_message = String::from("Invalid API key.");
    report.push_step(Step::passed("API key configuration successful"));
    report.catalog.push(descriptor("models/gemini-1.5-flash"));

    // WHEN: Serializing to JSON
    let json = serde_json::to_string(&report).expect("report must serialize");

    // THEN: Category uses the stable snake_case wire name
    assert!(json.contains("invalid_credential"));
    assert!(json.contains("AIzaSyDe****jklm"));
}

/// **VALUE**: Verifies the model descriptor parses the provider's
/// camelCase wire format, with absent optional fields defaulted.
///
/// **WHY THIS MATTERS**: The provider omits `description` and token
/// limits for some models. Deserialization must not fail on them.
#[test]
fn given_sparse_wire_model_when_deserialized_then_defaults_applied() {
    let json = r#"{
        "name": "models/gemini-1.5-flash",
        "displayName": "Gemini 1.5 Flash",
        "supportedGenerationMethods": ["generateContent", "countTokens"]
    }"#;

    let model: ModelDescriptor = serde_json::from_str(json).expect("must parse");

    assert_eq!(model.short_name(), "gemini-1.5-flash");
    assert_eq!(model.description, "");
    assert_eq!(model.input_token_limit, None);
    assert!(
        model
            .supported_generation_methods
            .contains(&String::from("generateContent"))
    );
}

/// **VALUE**: Verifies steps render with the expected glyphs and keep
/// insertion order.
///
/// **WHY THIS MATTERS**: The step log is the user's view into partial
/// progress; order and glyphs are part of the contract with the
/// presentation layer.
#[test]
fn given_steps_when_displayed_then_glyph_prefix_and_order_preserved() {
    let mut report = ProbeReport::new(String::from("****"));
    report.push_step(Step::passed("first"));
    report.push_step(Step::warning("second"));
    report.push_step(Step::failed("third"));
    report.push_step(Step::info("fourth"));

    let rendered: Vec<String> = report.steps.iter().map(ToString::to_string).collect();

    assert_eq!(rendered, vec!["✓ first", "⚠ second", "✗ third", "ℹ fourth"]);
    assert_eq!(report.steps[1].kind, StepKind::Warning);
}
