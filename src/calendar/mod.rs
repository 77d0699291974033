mod auth;
pub mod models;
mod service;

pub use auth::Session;
pub use models::{CalendarEvent, EventTime};
pub use service::{CalendarService, GoogleCalendarService, ListQuery};
