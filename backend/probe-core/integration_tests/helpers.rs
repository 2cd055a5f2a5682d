// Shared fixtures for probing a wiremock stand-in of the Gemini API.

use probe_core::Prober;
use probe_core::policy::SelectionPolicy;

use common::RedactedApiKey;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A structurally valid key: forty 'x' characters.
pub fn test_key() -> RedactedApiKey {
    RedactedApiKey::new("x".repeat(40))
}

/// Prober wired to the mock server's /v1beta tree.
pub fn prober_for(server: &MockServer) -> Prober {
    Prober::new(SelectionPolicy::default()).with_base_url(format!("{}/v1beta", server.uri()))
}

/// One model entry in the `models.list` wire shape.
pub fn wire_model(name: &str, methods: &[&str]) -> Value {
    json!({
        "name": format!("models/{name}"),
        "displayName": name,
        "description": format!("{name} description"),
        "supportedGenerationMethods": methods,
        "inputTokenLimit": 1_000_000,
        "outputTokenLimit": 8192
    })
}

/// Mount a single-page `models.list` response.
pub async fn mount_models(server: &MockServer, models: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": models })))
        .mount(server)
        .await;
}

/// Mount a `generateContent` response returning the given text.
pub async fn mount_generation(server: &MockServer, model: &str, text: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{model}:generateContent")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": text }]
                },
                "finishReason": "STOP"
            }]
        })))
        .mount(server)
        .await;
}

/// Standard Google API error envelope.
pub fn error_envelope(code: u16, status: &str, message: &str, reason: Option<&str>) -> Value {
    let details = match reason {
        Some(reason) => json!([{
            "@type": "type.googleapis.com/google.rpc.ErrorInfo",
            "reason": reason,
            "domain": "googleapis.com"
        }]),
        None => json!([]),
    };

    json!({
        "error": {
            "code": code,
            "message": message,
            "status": status,
            "details": details
        }
    })
}
