use crate::calendar::{CalendarService, ListQuery};
use crate::error::{time_error, AssistantResult};
use crate::intent::{non_blank, EventDetails};
use crate::status::StatusSink;
use crate::timewindow::parse_timestamp;
use chrono::{NaiveDateTime, TimeZone, Timelike};
use chrono_tz::Tz;
use tracing::info;

/// Move an existing event to a new start, preserving its duration.
///
/// The title is a search key; only the first match is considered. A new
/// start at exactly midnight means the model was given only a date, so the
/// original event's time of day is kept. The model's `new_end_time` is
/// ignored in favor of the original duration.
pub async fn run(
    service: &dyn CalendarService,
    calendar_id: &str,
    event: EventDetails,
    tz: Tz,
    sink: &dyn StatusSink,
) -> AssistantResult<()> {
    let Some(title) = non_blank(&event.summary) else {
        sink.warning("Event title is required for rescheduling.");
        return Ok(());
    };

    let query = ListQuery {
        query: Some(title.to_string()),
        single_events: true,
        max_results: Some(1),
        ..Default::default()
    };

    let candidates = match service.list_events(calendar_id, query).await {
        Ok(events) => events,
        Err(e) => {
            sink.error(&format!("Error while rescheduling event: {}", e));
            return Ok(());
        }
    };

    let Some(original) = candidates.into_iter().next() else {
        sink.info(&format!(
            "No events found matching '{}' for rescheduling.",
            title
        ));
        return Ok(());
    };

    let orig_start_raw = original
        .start
        .as_ref()
        .and_then(|s| s.date_time.as_deref())
        .ok_or_else(|| time_error("Matched event has no start time"))?;
    let orig_end_raw = original
        .end
        .as_ref()
        .and_then(|e| e.date_time.as_deref())
        .ok_or_else(|| time_error("Matched event has no end time"))?;

    let orig_start = parse_timestamp(orig_start_raw, tz)?;
    let orig_end = parse_timestamp(orig_end_raw, tz)?;
    let duration = orig_end - orig_start;

    let new_start_raw = non_blank(&event.new_start_time)
        .ok_or_else(|| time_error("Missing new start time for rescheduling"))?;
    let mut new_start = parse_timestamp(new_start_raw, tz)?;

    // Midnight means the model supplied only a date; keep the original
    // event's time of day
    if new_start.hour() == 0 && new_start.minute() == 0 {
        let naive = NaiveDateTime::new(new_start.date_naive(), orig_start.time());
        new_start = tz
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| time_error("Ambiguous or invalid rescheduled time"))?;
    }

    let new_end = new_start + duration;

    info!(
        "Rescheduling '{}' ({}) from {} to {}",
        title, original.id, orig_start, new_start
    );

    // Mutate only the start and end instants; everything else on the
    // fetched event rides along unchanged
    let mut updated = original.clone();
    if let Some(start) = updated.start.as_mut() {
        start.date_time = Some(new_start.to_rfc3339());
    }
    if let Some(end) = updated.end.as_mut() {
        end.date_time = Some(new_end.to_rfc3339());
    }

    match service
        .update_event(calendar_id, &original.id, &updated)
        .await
    {
        Ok(_) => sink.success(&format!(
            "Rescheduled event '{}' to {}",
            title,
            new_start.format("%B %d, %Y at %I:%M %p")
        )),
        Err(e) => sink.error(&format!("Error while rescheduling event: {}", e)),
    }

    Ok(())
}
