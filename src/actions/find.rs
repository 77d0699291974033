use crate::calendar::{CalendarService, ListQuery};
use crate::error::AssistantResult;
use crate::intent::{non_blank, EventDetails};
use crate::status::StatusSink;
use crate::timewindow::parse_timestamp;
use chrono_tz::Tz;

/// Find events within a time range.
///
/// The end bound defaults to the start bound when absent, giving a
/// same-instant window.
pub async fn run(
    service: &dyn CalendarService,
    calendar_id: &str,
    event: EventDetails,
    tz: Tz,
    sink: &dyn StatusSink,
) -> AssistantResult<()> {
    let Some(start_raw) = non_blank(&event.start_time) else {
        sink.warning("Start time is required for finding events.");
        return Ok(());
    };

    let start = parse_timestamp(start_raw, tz)?;
    let end = match non_blank(&event.end_time) {
        Some(end) => parse_timestamp(end, tz)?,
        None => start,
    };

    let query = ListQuery {
        time_min: Some(start.to_rfc3339()),
        time_max: Some(end.to_rfc3339()),
        single_events: true,
        order_by: Some("startTime".to_string()),
        ..Default::default()
    };

    match service.list_events(calendar_id, query).await {
        Ok(events) if !events.is_empty() => {
            sink.info("Found events:");
            for event in &events {
                let title = event.summary.as_deref().unwrap_or("No Title");
                let start = event
                    .start
                    .as_ref()
                    .and_then(|s| s.when())
                    .unwrap_or("unknown time");
                sink.info(&format!("📅 {}: {}", title, start));
            }
        }
        Ok(_) => sink.info("No events found."),
        Err(e) => sink.error(&format!("Failed to fetch events: {}", e)),
    }

    Ok(())
}
