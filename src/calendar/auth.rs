use super::service::{CalendarService, GoogleCalendarService};
use crate::config::Config;
use std::sync::Arc;

/// Authentication state for one user session.
///
/// Credential acquisition and refresh belong to the external sign-in flow;
/// this crate only consumes the resulting access token and calendar id.
/// Either one missing means the session is not usable for calendar actions.
#[derive(Clone, Default)]
pub struct Session {
    service: Option<Arc<dyn CalendarService>>,
    calendar_id: Option<String>,
}

impl Session {
    /// Session with a calendar service and calendar id, as produced by a
    /// completed sign-in
    pub fn authenticated(
        service: Arc<dyn CalendarService>,
        calendar_id: impl Into<String>,
    ) -> Self {
        Self {
            service: Some(service),
            calendar_id: Some(calendar_id.into()),
        }
    }

    /// Session without calendar access
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    /// Build a session from configuration, unauthenticated if the access
    /// token or calendar id is not configured
    pub fn from_config(config: &Config) -> Self {
        match (&config.google_access_token, &config.google_calendar_id) {
            (Some(token), Some(calendar_id)) => Self::authenticated(
                Arc::new(GoogleCalendarService::new(token.clone())),
                calendar_id.clone(),
            ),
            _ => Self::unauthenticated(),
        }
    }

    /// The calendar service and calendar id, when both are present
    pub fn calendar(&self) -> Option<(&dyn CalendarService, &str)> {
        match (&self.service, &self.calendar_id) {
            (Some(service), Some(calendar_id)) => {
                Some((service.as_ref(), calendar_id.as_str()))
            }
            _ => None,
        }
    }
}
