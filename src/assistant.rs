use crate::actions::dispatch;
use crate::calendar::Session;
use crate::config::Config;
use crate::error::AssistantResult;
use crate::extractor::IntentExtractor;
use crate::status::StatusSink;
use chrono::Utc;
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::debug;

/// The full request pipeline: extract an intent from free text, then
/// dispatch it against the user's calendar.
pub struct Assistant {
    extractor: IntentExtractor,
    session: Session,
    timezone: Tz,
    sink: Arc<dyn StatusSink>,
}

impl Assistant {
    pub fn new(
        config: &Config,
        session: Session,
        sink: Arc<dyn StatusSink>,
    ) -> AssistantResult<Self> {
        Ok(Self {
            extractor: IntentExtractor::new(config),
            session,
            timezone: config.working_timezone()?,
            sink,
        })
    }

    /// Handle one user request end to end.
    ///
    /// All outcomes are delivered through the status sink; this never
    /// fails and never panics on bad model output.
    pub async fn handle_request(&self, user_text: &str) {
        let now = Utc::now().with_timezone(&self.timezone);
        debug!("Handling request at {}: {}", now, user_text);

        let intent = self.extractor.extract(user_text, now).await;
        dispatch(intent, &self.session, now, self.timezone, self.sink.as_ref()).await;
    }
}
