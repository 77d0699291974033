use crate::error::{time_error, AssistantResult};
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Parse an ISO-8601 timestamp into the working timezone.
///
/// Timestamps from the model normally carry an offset; a naive timestamp is
/// interpreted as local time in the working timezone.
pub fn parse_timestamp(value: &str, tz: Tz) -> AssistantResult<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&tz));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| time_error(&format!("Failed to parse timestamp '{}': {}", value, e)))?;

    from_local(naive, tz)
}

/// Full-day window for the reference date: 00:00:00 through 23:59:59
pub fn day_window(reference: DateTime<Tz>, tz: Tz) -> AssistantResult<(DateTime<Tz>, DateTime<Tz>)> {
    let date = reference.date_naive();
    let start = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| time_error("Failed to create start of day"))?;
    let end = date
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| time_error("Failed to create end of day"))?;
    Ok((from_local(start, tz)?, from_local(end, tz)?))
}

/// Resolve the time window for a delete sweep.
///
/// No start: the reference day. Start without end: one full day from the
/// start. Delete sweeps a day by default, unlike create's one-hour default.
pub fn resolve_delete_window(
    start: Option<&str>,
    end: Option<&str>,
    reference: DateTime<Tz>,
    tz: Tz,
) -> AssistantResult<(DateTime<Tz>, DateTime<Tz>)> {
    let Some(start) = start else {
        return day_window(reference, tz);
    };

    let start = parse_timestamp(start, tz)?;
    let end = match end {
        Some(end) => parse_timestamp(end, tz)?,
        None => start + Duration::days(1),
    };

    Ok((start, end))
}

/// Default end time for a new event: one hour after its start
pub fn default_create_end(start: DateTime<Tz>) -> DateTime<Tz> {
    start + Duration::hours(1)
}

fn from_local(naive: NaiveDateTime, tz: Tz) -> AssistantResult<DateTime<Tz>> {
    tz.from_local_datetime(&naive)
        .single()
        .ok_or_else(|| time_error(&format!("Ambiguous or invalid local time: {}", naive)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Kolkata;

    fn reference(value: &str) -> DateTime<Tz> {
        parse_timestamp(value, Kolkata).unwrap()
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let dt = parse_timestamp("2024-06-10T09:00:00+05:30", Kolkata).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-10T09:00:00+05:30");
    }

    #[test]
    fn test_parse_naive_timestamp_assumes_working_timezone() {
        let dt = parse_timestamp("2024-06-10T09:00:00", Kolkata).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-10T09:00:00+05:30");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("next tuesday", Kolkata).is_err());
    }

    #[test]
    fn test_delete_window_defaults_to_reference_day() {
        let now = reference("2024-06-10T13:45:00+05:30");
        let (start, end) = resolve_delete_window(None, None, now, Kolkata).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-06-10T00:00:00+05:30");
        assert_eq!(end.to_rfc3339(), "2024-06-10T23:59:59+05:30");
    }

    #[test]
    fn test_delete_window_start_only_spans_one_day() {
        let now = reference("2024-06-10T13:45:00+05:30");
        let (start, end) =
            resolve_delete_window(Some("2024-06-10T09:00:00+05:30"), None, now, Kolkata).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-06-10T09:00:00+05:30");
        assert_eq!(end.to_rfc3339(), "2024-06-11T09:00:00+05:30");
    }

    #[test]
    fn test_delete_window_explicit_bounds_kept() {
        let now = reference("2024-06-10T13:45:00+05:30");
        let (start, end) = resolve_delete_window(
            Some("2024-06-10T09:00:00+05:30"),
            Some("2024-06-10T12:00:00+05:30"),
            now,
            Kolkata,
        )
        .unwrap();
        assert_eq!(start.to_rfc3339(), "2024-06-10T09:00:00+05:30");
        assert_eq!(end.to_rfc3339(), "2024-06-10T12:00:00+05:30");
    }

    #[test]
    fn test_create_default_duration_is_one_hour() {
        let start = reference("2024-06-10T14:00:00+05:30");
        let end = default_create_end(start);
        assert_eq!(end.to_rfc3339(), "2024-06-10T15:00:00+05:30");
    }
}
