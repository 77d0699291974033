use crate::calendar::{CalendarService, Session};
use crate::error::AssistantResult;
use crate::intent::Intent;
use crate::status::StatusSink;
use chrono::DateTime;
use chrono_tz::Tz;
use tracing::warn;

mod create;
mod delete;
mod find;
mod reschedule;

/// Route an intent to its handler and report the outcome.
///
/// Single step, no state across calls. Calendar actions require an
/// authenticated session before any handler runs; a handler failure is
/// caught here and reported, never propagated — one failed request must
/// not take down the session.
pub async fn dispatch(
    intent: Intent,
    session: &Session,
    reference_time: DateTime<Tz>,
    tz: Tz,
    sink: &dyn StatusSink,
) {
    let label = intent.action_label();

    match intent {
        Intent::Message(content) => {
            sink.info(&format!("Assistant response: {}", content));
        }
        Intent::Error(content) => {
            sink.error(&content);
        }
        Intent::Unsupported(action) => {
            if action.is_empty() {
                sink.warning("Invalid or missing action in the response.");
            } else {
                warn!("Model produced unsupported action '{}'", action);
                sink.warning(&format!("Unsupported action: {}", action));
            }
        }
        Intent::Create(event) => {
            let Some((service, calendar_id)) = authenticated(session, sink) else {
                return;
            };
            backstop(
                label,
                create::run(service, calendar_id, event, tz, sink).await,
                sink,
            );
        }
        Intent::Find(event) => {
            let Some((service, calendar_id)) = authenticated(session, sink) else {
                return;
            };
            backstop(
                label,
                find::run(service, calendar_id, event, tz, sink).await,
                sink,
            );
        }
        Intent::Delete(event) => {
            let Some((service, calendar_id)) = authenticated(session, sink) else {
                return;
            };
            backstop(
                label,
                delete::run(service, calendar_id, event, reference_time, tz, sink).await,
                sink,
            );
        }
        Intent::Reschedule(event) => {
            let Some((service, calendar_id)) = authenticated(session, sink) else {
                return;
            };
            backstop(
                label,
                reschedule::run(service, calendar_id, event, tz, sink).await,
                sink,
            );
        }
    }
}

/// Calendar access for the session, reporting a single authentication
/// failure when the service handle or calendar id is missing
fn authenticated<'a>(
    session: &'a Session,
    sink: &dyn StatusSink,
) -> Option<(&'a dyn CalendarService, &'a str)> {
    let calendar = session.calendar();
    if calendar.is_none() {
        sink.error("Not authenticated with Google. Please sign in first.");
    }
    calendar
}

/// Report a handler failure that escaped its own error handling
fn backstop(label: &str, result: AssistantResult<()>, sink: &dyn StatusSink) {
    if let Err(e) = result {
        sink.error(&format!("Error executing {} action: {}", label, e));
    }
}
