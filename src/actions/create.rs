use crate::calendar::{CalendarEvent, CalendarService, EventTime};
use crate::error::AssistantResult;
use crate::intent::{is_blank, non_blank, EventDetails};
use crate::status::StatusSink;
use crate::timewindow::{default_create_end, parse_timestamp};
use chrono_tz::Tz;
use tracing::info;

/// Default description for events created without one
const DEFAULT_DESCRIPTION: &str = "Created by AI Calendar Assistant";

/// Create a new event.
///
/// Requires a title and a start time; the end defaults to one hour after
/// the start, the usual meeting length.
pub async fn run(
    service: &dyn CalendarService,
    calendar_id: &str,
    event: EventDetails,
    tz: Tz,
    sink: &dyn StatusSink,
) -> AssistantResult<()> {
    let mut missing = Vec::new();
    if is_blank(&event.start_time) {
        missing.push("start_time");
    }
    if is_blank(&event.summary) {
        missing.push("summary");
    }
    if !missing.is_empty() {
        sink.warning(&format!("Missing required fields: {}", missing.join(", ")));
        return Ok(());
    }

    let summary = non_blank(&event.summary).unwrap_or_default().to_string();
    let start = parse_timestamp(non_blank(&event.start_time).unwrap_or_default(), tz)?;
    let end = match non_blank(&event.end_time) {
        Some(end) => parse_timestamp(end, tz)?,
        None => default_create_end(start),
    };

    let time_zone = tz.name();
    let body = CalendarEvent {
        summary: Some(summary.clone()),
        start: Some(EventTime::at(start.to_rfc3339(), time_zone)),
        end: Some(EventTime::at(end.to_rfc3339(), time_zone)),
        description: Some(
            non_blank(&event.description)
                .unwrap_or(DEFAULT_DESCRIPTION)
                .to_string(),
        ),
        ..Default::default()
    };

    info!("Creating event '{}' from {} to {}", summary, start, end);

    match service.insert_event(calendar_id, &body).await {
        Ok(_) => sink.success(&format!("Event '{}' created successfully!", summary)),
        Err(e) => sink.error(&format!("Failed to create event: {}", e)),
    }

    Ok(())
}
