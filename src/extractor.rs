use crate::config::Config;
use crate::intent::{Intent, RawIntent, EMPTY_RESPONSE_PLACEHOLDER};
use chrono::DateTime;
use chrono_tz::Tz;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, info};

const SYSTEM_PROMPT_TEMPLATE: &str = "\
You are a highly capable calendar assistant. Current date and time is {current_date} in the {timezone} timezone.
You will receive user inputs related to calendar events. Your job is to map the user's request to a specific calendar action
(create, find, delete, reschedule) and provide structured event details as needed using tool calling.

When handling deletion requests:
- If the user asks to delete events for a specific day, use the \"delete\" action, not \"find\"
- For \"tomorrow\", use the next day's date range
- For \"today\", use the current day's date range
- Set both start_time and end_time to cover the full day (00:00:00 to 23:59:59)

When handling rescheduling requests:
- Use the \"reschedule\" action directly, not \"find\" then \"reschedule\"
- Preserve the original event's time of day when moving to a new date
- For specific date changes (e.g., \"from X to Y\"), use those exact dates
- Always include both new_start_time and new_end_time in the response";

/// Extracts a calendar intent from free text via Azure OpenAI tool calling.
///
/// The extractor never fails past its boundary: every outcome, including
/// transport and parse failures, is a well-formed `Intent`.
pub struct IntentExtractor {
    client: Client,
    endpoint: String,
    api_key: String,
    timezone: String,
}

impl IntentExtractor {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint_with_version(),
            api_key: config.azure_openai_api_key.clone(),
            timezone: config.timezone.clone(),
        }
    }

    /// Classify the user's request into a calendar intent.
    ///
    /// `reference_time` pins relative phrases like "tomorrow" to a fixed
    /// instant instead of wall-clock time at model evaluation.
    pub async fn extract(&self, user_text: &str, reference_time: DateTime<Tz>) -> Intent {
        let payload = self.build_payload(user_text, reference_time);

        debug!("Calling language model for intent extraction");

        let response = match self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Language model request failed: {}", e);
                return Intent::Error(format!("API request failed: {}", e));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            error!("Language model returned HTTP {}: {}", status, body);
            return Intent::Error(format!("HTTP Error: {} - {}", status, body));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to read language model response: {}", e);
                return Intent::Error(format!("API request failed: {}", e));
            }
        };

        let intent = parse_model_response(&body);
        info!("Extracted intent: {}", intent.action_label());
        intent
    }

    fn build_payload(&self, user_text: &str, reference_time: DateTime<Tz>) -> Value {
        let current_date = reference_time.format("%Y-%m-%d %H:%M:%S").to_string();
        let system_prompt = SYSTEM_PROMPT_TEMPLATE
            .replace("{current_date}", &current_date)
            .replace("{timezone}", &self.timezone);

        json!({
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_text.trim()}
            ],
            "tools": [calendar_action_tool()],
            "tool_choice": {"type": "function", "function": {"name": "calendar_action"}}
        })
    }
}

/// The fixed structured-output schema the model answers through
fn calendar_action_tool() -> Value {
    json!({
        "type": "function",
        "function": {
            "name": "calendar_action",
            "description": "Handles creating, finding, deleting, or rescheduling events.",
            "parameters": {
                "type": "object",
                "properties": {
                    "action": {
                        "type": "string",
                        "enum": ["create", "find", "delete", "reschedule"],
                        "description": "The type of calendar action requested by the user. Use 'delete' for deletion requests, not 'find'."
                    },
                    "event": {
                        "type": "object",
                        "properties": {
                            "summary": {"type": "string", "description": "The title or summary of the event. Use empty string for bulk deletions."},
                            "start_time": {"type": "string", "description": "The start time of the event in ISO format with timezone."},
                            "end_time": {"type": "string", "description": "The end time of the event in ISO format with timezone."},
                            "new_start_time": {"type": "string", "description": "The new start time for rescheduling. When rescheduling, provide this directly without using find action first."},
                            "new_end_time": {"type": "string", "description": "The new end time for rescheduling. Should maintain the same duration as the original event."},
                            "description": {"type": "string", "description": "A description or purpose of the event."}
                        },
                        "required": ["summary", "start_time"]
                    }
                },
                "required": ["action"]
            }
        }
    })
}

/// Parse a raw chat-completions response body into an intent.
///
/// A function-style tool call with decodable arguments wins; otherwise the
/// plain-text reply is wrapped as a message, with a fixed placeholder when
/// the reply is empty. A malformed top-level body becomes an error intent.
pub fn parse_model_response(body: &str) -> Intent {
    let response: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to parse language model response: {}", e);
            return Intent::Error("Response parsing error.".to_string());
        }
    };

    let message = &response["choices"][0]["message"];

    let tool_call = &message["tool_calls"][0];
    if tool_call["type"] == "function" {
        if let Some(arguments) = tool_call["function"]["arguments"].as_str() {
            match serde_json::from_str::<RawIntent>(arguments) {
                Ok(raw) => return Intent::from_raw(raw),
                Err(e) => {
                    // Fall through to the plain-text reply
                    error!("Failed to decode tool-call arguments: {}", e);
                }
            }
        }
    }

    let content = message["content"].as_str().unwrap_or("").trim();
    if content.is_empty() {
        Intent::Message(EMPTY_RESPONSE_PLACEHOLDER.to_string())
    } else {
        Intent::Message(content.to_string())
    }
}
