use serde::{Deserialize, Serialize};

/// Fixed placeholder for an empty model reply
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "Received an empty response from the assistant.";

/// Fixed placeholder for an error intent without diagnostic text
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Event parameters extracted from the user's request.
///
/// All timestamps are ISO-8601 strings as supplied by the model; they are
/// parsed and normalized only when a handler resolves its time window.
/// An empty `summary` is a valid value: delete treats it as "match all
/// events in the window".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    pub summary: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub new_start_time: Option<String>,
    pub new_end_time: Option<String>,
    pub description: Option<String>,
}

/// The structured decision object produced from user text.
///
/// A closed sum type: every value the extractor can produce is dispatchable,
/// so the dispatcher never sees a half-formed request. Unknown or missing
/// action tags are resolved at decode time into `Unsupported`.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Free-text reply from the assistant
    Message(String),
    /// Extraction-pipeline failure, downgraded to a displayable value
    Error(String),
    Create(EventDetails),
    Find(EventDetails),
    Delete(EventDetails),
    Reschedule(EventDetails),
    /// Action tag the dispatcher does not recognize; empty when missing
    Unsupported(String),
}

/// Wire shape of the model's function-call arguments
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIntent {
    pub action: Option<String>,
    pub event: Option<EventDetails>,
    pub content: Option<String>,
}

impl Intent {
    /// Decode the wire shape into a dispatchable intent
    pub fn from_raw(raw: RawIntent) -> Self {
        let event = raw.event.unwrap_or_default();
        match raw.action.as_deref() {
            Some("message") => Intent::Message(non_empty_content(
                raw.content,
                EMPTY_RESPONSE_PLACEHOLDER,
            )),
            Some("error") => {
                Intent::Error(non_empty_content(raw.content, DEFAULT_ERROR_MESSAGE))
            }
            Some("create") => Intent::Create(event),
            Some("find") => Intent::Find(event),
            Some("delete") => Intent::Delete(event),
            Some("reschedule") => Intent::Reschedule(event),
            Some(other) => Intent::Unsupported(other.to_string()),
            None => Intent::Unsupported(String::new()),
        }
    }

    /// Action label used in boundary error reports
    pub fn action_label(&self) -> &'static str {
        match self {
            Intent::Message(_) => "message",
            Intent::Error(_) => "error",
            Intent::Create(_) => "create",
            Intent::Find(_) => "find",
            Intent::Delete(_) => "delete",
            Intent::Reschedule(_) => "reschedule",
            Intent::Unsupported(_) => "unsupported",
        }
    }
}

fn non_empty_content(content: Option<String>, placeholder: &str) -> String {
    match content {
        Some(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => placeholder.to_string(),
    }
}

/// Whether an optional field is missing or blank.
///
/// The model sometimes emits empty strings for fields it has no value for;
/// required-field validation treats those the same as absent.
pub fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// The field's value when present and non-blank
pub fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(action: &str) -> RawIntent {
        RawIntent {
            action: Some(action.to_string()),
            event: None,
            content: None,
        }
    }

    #[test]
    fn test_decode_calendar_actions() {
        assert!(matches!(Intent::from_raw(raw("create")), Intent::Create(_)));
        assert!(matches!(Intent::from_raw(raw("find")), Intent::Find(_)));
        assert!(matches!(Intent::from_raw(raw("delete")), Intent::Delete(_)));
        assert!(matches!(
            Intent::from_raw(raw("reschedule")),
            Intent::Reschedule(_)
        ));
    }

    #[test]
    fn test_decode_unknown_action() {
        assert_eq!(
            Intent::from_raw(raw("archive")),
            Intent::Unsupported("archive".to_string())
        );
    }

    #[test]
    fn test_decode_missing_action() {
        let raw = RawIntent::default();
        assert_eq!(Intent::from_raw(raw), Intent::Unsupported(String::new()));
    }

    #[test]
    fn test_empty_message_content_gets_placeholder() {
        let raw = RawIntent {
            action: Some("message".to_string()),
            event: None,
            content: Some("   ".to_string()),
        };
        assert_eq!(
            Intent::from_raw(raw),
            Intent::Message(EMPTY_RESPONSE_PLACEHOLDER.to_string())
        );
    }

    #[test]
    fn test_missing_event_defaults_to_empty_details() {
        let intent = Intent::from_raw(raw("delete"));
        assert_eq!(intent, Intent::Delete(EventDetails::default()));
    }

    #[test]
    fn test_blank_detection() {
        assert!(is_blank(&None));
        assert!(is_blank(&Some(String::new())));
        assert!(is_blank(&Some("  ".to_string())));
        assert!(!is_blank(&Some("Standup".to_string())));
        assert_eq!(non_blank(&Some(" Standup ".to_string())), Some("Standup"));
    }
}
