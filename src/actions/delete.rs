use crate::calendar::{CalendarService, ListQuery};
use crate::error::AssistantResult;
use crate::intent::{non_blank, EventDetails};
use crate::status::StatusSink;
use crate::timewindow::resolve_delete_window;
use chrono::DateTime;
use chrono_tz::Tz;
use tracing::info;

/// Phrasings that turn a title filter into a bulk sweep
const BULK_KEYWORDS: [&str; 2] = ["all events", "all my events"];

/// Delete events matching a title within a time window.
///
/// An empty title means "match all events in the window". Deletion is
/// sequential and unconditional; a failure mid-loop is reported and the
/// loop is not resumed, with prior deletions left in place.
pub async fn run(
    service: &dyn CalendarService,
    calendar_id: &str,
    event: EventDetails,
    reference_time: DateTime<Tz>,
    tz: Tz,
    sink: &dyn StatusSink,
) -> AssistantResult<()> {
    let title = normalize_title(event.summary.as_deref().unwrap_or_default());

    let (start, end) = resolve_delete_window(
        non_blank(&event.start_time),
        non_blank(&event.end_time),
        reference_time,
        tz,
    )?;

    let query = ListQuery {
        time_min: Some(start.to_rfc3339()),
        time_max: Some(end.to_rfc3339()),
        single_events: true,
        // No q parameter at all for a bulk sweep; an empty filter would
        // match nothing
        query: if title.is_empty() {
            None
        } else {
            Some(title.clone())
        },
        ..Default::default()
    };

    info!(
        "Deleting events between {} and {} (title filter: {:?})",
        start, end, title
    );

    let events = match service.list_events(calendar_id, query).await {
        Ok(events) => events,
        Err(e) => {
            sink.error(&format!("Error while deleting events: {}", e));
            return Ok(());
        }
    };

    if events.is_empty() {
        sink.info("No matching events found for deletion.");
        return Ok(());
    }

    let mut deleted = 0usize;
    for event in &events {
        if let Err(e) = service.delete_event(calendar_id, &event.id).await {
            // Events already deleted stay deleted; there is no rollback
            sink.error(&format!("Error while deleting events: {}", e));
            return Ok(());
        }
        deleted += 1;
    }

    sink.success(&format!("Deleted {} events successfully!", deleted));
    Ok(())
}

/// Collapse "delete all events" style titles into the bulk sentinel
fn normalize_title(summary: &str) -> String {
    let lower = summary.to_lowercase();
    if !summary.is_empty() && BULK_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        String::new()
    } else {
        summary.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_phrases_become_sentinel() {
        assert_eq!(normalize_title("delete all events"), "");
        assert_eq!(normalize_title("All My Events please"), "");
        assert_eq!(normalize_title("ALL EVENTS today"), "");
    }

    #[test]
    fn test_specific_titles_kept() {
        assert_eq!(normalize_title("Standup"), "Standup");
        assert_eq!(normalize_title(""), "");
    }
}
