use calmate::extractor::parse_model_response;
use calmate::intent::{EventDetails, Intent, EMPTY_RESPONSE_PLACEHOLDER};

fn body_with_arguments(arguments: serde_json::Value) -> String {
    serde_json::json!({
        "choices": [{
            "message": {
                "tool_calls": [{
                    "type": "function",
                    "function": {
                        "name": "calendar_action",
                        "arguments": arguments.to_string()
                    }
                }]
            }
        }]
    })
    .to_string()
}

#[test]
fn test_every_response_shape_yields_a_dispatchable_intent() {
    // No shape of model output may escape the extractor as anything but
    // a well-formed intent
    let bodies = [
        String::new(),
        "null".to_string(),
        "[]".to_string(),
        "{}".to_string(),
        "<html>503</html>".to_string(),
        r#"{"choices": []}"#.to_string(),
        r#"{"choices": [{"message": {}}]}"#.to_string(),
        r#"{"choices": [{"message": {"tool_calls": [{"type": "retrieval"}]}}]}"#.to_string(),
        body_with_arguments(serde_json::json!({"action": "create"})),
        body_with_arguments(serde_json::json!({"event": {"summary": "x"}})),
        body_with_arguments(serde_json::json!({"action": "archive"})),
    ];

    for body in bodies {
        // Any variant is acceptable; reaching here without a panic is the
        // property under test
        let intent = parse_model_response(&body);
        assert!(!intent.action_label().is_empty(), "body: {}", body);
    }
}

#[test]
fn test_structured_payload_wins_over_content() {
    let body = serde_json::json!({
        "choices": [{
            "message": {
                "content": "I created it for you.",
                "tool_calls": [{
                    "type": "function",
                    "function": {
                        "name": "calendar_action",
                        "arguments": serde_json::json!({
                            "action": "find",
                            "event": {"start_time": "2024-06-10T00:00:00+05:30"}
                        }).to_string()
                    }
                }]
            }
        }]
    })
    .to_string();

    assert_eq!(
        parse_model_response(&body),
        Intent::Find(EventDetails {
            start_time: Some("2024-06-10T00:00:00+05:30".to_string()),
            ..Default::default()
        })
    );
}

#[test]
fn test_empty_fallback_text_becomes_placeholder() {
    let body = serde_json::json!({
        "choices": [{"message": {"content": ""}}]
    })
    .to_string();

    let Intent::Message(content) = parse_model_response(&body) else {
        panic!("expected a message intent");
    };
    assert_eq!(content, EMPTY_RESPONSE_PLACEHOLDER);
    assert!(!content.is_empty());
}

#[test]
fn test_empty_summary_survives_decoding() {
    // The bulk sentinel must never be treated as a parse failure
    let body = body_with_arguments(serde_json::json!({
        "action": "delete",
        "event": {"summary": ""}
    }));

    assert_eq!(
        parse_model_response(&body),
        Intent::Delete(EventDetails {
            summary: Some(String::new()),
            ..Default::default()
        })
    );
}
