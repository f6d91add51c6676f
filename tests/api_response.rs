use lifeflow::api::models::GenerateContentResponse;
use lifeflow::api::response::{extract_error_message, extract_text};
use lifeflow::api::{GenerateContentRequest, ModelList, RawResponse};
use serde_json::json;

#[test]
fn test_extract_text_single_part() {
    let response = json!({
        "candidates": [{
            "content": {"parts": [{"text": "Hi!"}], "role": "model"},
            "finishReason": "STOP"
        }]
    });

    assert_eq!(extract_text(&response), Some("Hi!".to_string()));
}

#[test]
fn test_extract_text_joins_parts() {
    let response = json!({
        "candidates": [{
            "content": {"parts": [{"text": "Hello, "}, {"text": "world"}]}
        }]
    });

    assert_eq!(extract_text(&response), Some("Hello, world".to_string()));
}

#[test]
fn test_extract_text_missing_candidates() {
    assert_eq!(extract_text(&json!({"promptFeedback": {}})), None);
    assert_eq!(extract_text(&json!({"candidates": []})), None);
}

#[test]
fn test_extract_error_message() {
    let body = json!({
        "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
    });
    assert_eq!(
        extract_error_message(&body),
        Some("API key not valid.".to_string())
    );
    assert_eq!(extract_error_message(&json!({"models": []})), None);
}

#[test]
fn test_typed_model_list() {
    let response = RawResponse::new(
        200,
        r#"{"models":[{"name":"models/gemini-2.0-flash","displayName":"Gemini 2.0 Flash","outputTokenLimit":8192}]}"#,
    )
    .decode();

    let list: ModelList = response.json().unwrap().unwrap();
    assert_eq!(list.models.len(), 1);
    assert_eq!(list.models[0].name, "models/gemini-2.0-flash");
    assert_eq!(list.models[0].display_name.as_deref(), Some("Gemini 2.0 Flash"));
    assert_eq!(list.models[0].output_token_limit, Some(8192));
    assert!(list.next_page_token.is_none());
}

#[test]
fn test_typed_generation_response() {
    let response = RawResponse::new(
        200,
        r#"{"candidates":[{"content":{"parts":[{"text":"Hi!"}]},"finishReason":"STOP"}]}"#,
    )
    .decode();

    let parsed: GenerateContentResponse = response.json().unwrap().unwrap();
    let candidate = &parsed.candidates[0];
    assert_eq!(candidate.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(candidate.content.as_ref().unwrap().parts[0].text, "Hi!");
}

#[test]
fn test_json_on_raw_body_is_none() {
    let response = RawResponse::new(500, "<html>oops</html>").decode();
    assert!(response.json::<ModelList>().is_none());
    assert_eq!(response.body_text(), "<html>oops</html>");
}

#[test]
fn test_request_body_shape() {
    let body = serde_json::to_value(GenerateContentRequest::from_prompt("Hello, world!")).unwrap();
    assert_eq!(body, json!({"contents": [{"parts": [{"text": "Hello, world!"}]}]}));
}
