use super::models::CalendarEvent;
use crate::error::{calendar_error, AssistantResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Parameters for an event list query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub time_min: Option<String>,
    pub time_max: Option<String>,
    /// Free-text filter; `None` means match all events in the window
    pub query: Option<String>,
    pub single_events: bool,
    pub order_by: Option<String>,
    pub max_results: Option<u32>,
}

/// Operations the handlers need from the calendar system of record.
///
/// Production uses the Google Calendar REST API; tests substitute a
/// recording mock.
#[async_trait]
pub trait CalendarService: Send + Sync {
    async fn list_events(
        &self,
        calendar_id: &str,
        query: ListQuery,
    ) -> AssistantResult<Vec<CalendarEvent>>;

    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> AssistantResult<CalendarEvent>;

    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        event: &CalendarEvent,
    ) -> AssistantResult<CalendarEvent>;

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> AssistantResult<()>;
}

/// Google Calendar REST client authenticated with an OAuth access token
pub struct GoogleCalendarService {
    client: Client,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct EventsPage {
    #[serde(default)]
    items: Vec<CalendarEvent>,
}

impl GoogleCalendarService {
    pub fn new(access_token: String) -> Self {
        Self {
            client: Client::new(),
            access_token,
        }
    }

    fn events_url(&self, calendar_id: &str, event_id: Option<&str>) -> AssistantResult<Url> {
        let mut url_str = format!("{}/calendars/{}/events", CALENDAR_API_BASE, calendar_id);
        if let Some(event_id) = event_id {
            url_str.push('/');
            url_str.push_str(event_id);
        }
        Url::parse(&url_str).map_err(|e| calendar_error(&format!("Failed to parse URL: {}", e)))
    }

    async fn check_status(
        response: reqwest::Response,
        context: &str,
    ) -> AssistantResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        Err(calendar_error(&format!(
            "{}: HTTP {} - {}",
            context, status, error_body
        )))
    }
}

#[async_trait]
impl CalendarService for GoogleCalendarService {
    async fn list_events(
        &self,
        calendar_id: &str,
        query: ListQuery,
    ) -> AssistantResult<Vec<CalendarEvent>> {
        let mut url = self.events_url(calendar_id, None)?;

        {
            let mut pairs = url.query_pairs_mut();
            if let Some(time_min) = &query.time_min {
                pairs.append_pair("timeMin", time_min);
            }
            if let Some(time_max) = &query.time_max {
                pairs.append_pair("timeMax", time_max);
            }
            // Omitted entirely when there is no title filter; an empty q
            // would match nothing
            if let Some(text) = &query.query {
                pairs.append_pair("q", text);
            }
            if query.single_events {
                pairs.append_pair("singleEvents", "true");
            }
            if let Some(order_by) = &query.order_by {
                pairs.append_pair("orderBy", order_by);
            }
            if let Some(max_results) = query.max_results {
                pairs.append_pair("maxResults", &max_results.to_string());
            }
        }

        debug!("Listing events: {}", url);

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .send()
            .await
            .map_err(|e| calendar_error(&format!("Failed to fetch events: {}", e)))?;

        let response = Self::check_status(response, "Failed to fetch events").await?;

        let page: EventsPage = response
            .json()
            .await
            .map_err(|e| calendar_error(&format!("Failed to parse events response: {}", e)))?;

        Ok(page.items)
    }

    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> AssistantResult<CalendarEvent> {
        let url = self.events_url(calendar_id, None)?;

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .json(event)
            .send()
            .await
            .map_err(|e| calendar_error(&format!("Failed to create event: {}", e)))?;

        let response = Self::check_status(response, "Failed to create event").await?;

        response
            .json()
            .await
            .map_err(|e| calendar_error(&format!("Failed to parse created event: {}", e)))
    }

    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        event: &CalendarEvent,
    ) -> AssistantResult<CalendarEvent> {
        let url = self.events_url(calendar_id, Some(event_id))?;

        let response = self
            .client
            .put(url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .json(event)
            .send()
            .await
            .map_err(|e| calendar_error(&format!("Failed to update event: {}", e)))?;

        let response = Self::check_status(response, "Failed to update event").await?;

        response
            .json()
            .await
            .map_err(|e| calendar_error(&format!("Failed to parse updated event: {}", e)))
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> AssistantResult<()> {
        let url = self.events_url(calendar_id, Some(event_id))?;

        let response = self
            .client
            .delete(url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .send()
            .await
            .map_err(|e| calendar_error(&format!("Failed to delete event: {}", e)))?;

        Self::check_status(response, "Failed to delete event").await?;
        Ok(())
    }
}
