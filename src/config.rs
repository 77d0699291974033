use crate::error::{config_error, env_error, AssistantResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;

/// Default Azure OpenAI REST API version
pub const DEFAULT_API_VERSION: &str = "2023-05-15";

/// Default working timezone for all time-window computation
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

/// Main configuration structure for the assistant
#[derive(Debug, Clone)]
pub struct Config {
    /// Azure OpenAI chat-completions endpoint, without query parameters
    pub azure_openai_endpoint: String,
    /// Azure OpenAI API key
    pub azure_openai_api_key: String,
    /// Azure OpenAI REST API version appended to the endpoint
    pub azure_api_version: String,
    /// OAuth access token produced by the external sign-in flow
    pub google_access_token: Option<String>,
    /// Google Calendar ID to operate on
    pub google_calendar_id: Option<String>,
    /// Working timezone name (IANA)
    pub timezone: String,
}

/// Optional overrides loaded from config/calmate.toml
#[derive(Debug, Default, Deserialize)]
struct Overrides {
    azure_api_version: Option<String>,
    timezone: Option<String>,
}

impl Config {
    /// Load configuration from environment and optional config file
    pub fn load() -> AssistantResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let endpoint = env::var("AZURE_OPENAI_ENDPOINT")
            .map_err(|_| env_error("AZURE_OPENAI_ENDPOINT"))?;
        let azure_openai_api_key = env::var("AZURE_OPENAI_API_KEY")
            .map_err(|_| env_error("AZURE_OPENAI_API_KEY"))?;

        // Optional authentication state; the dispatcher treats absence
        // as "not signed in" rather than a startup failure
        let google_access_token = env::var("GOOGLE_ACCESS_TOKEN").ok();
        let google_calendar_id = env::var("GOOGLE_CALENDAR_ID").ok();

        let mut azure_api_version =
            env::var("AZURE_API_VERSION").unwrap_or_else(|_| String::from(DEFAULT_API_VERSION));
        let mut timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from(DEFAULT_TIMEZONE));

        // Merge overrides from file if it exists
        if let Ok(content) = fs::read_to_string("config/calmate.toml") {
            if let Ok(overrides) = toml::from_str::<Overrides>(&content) {
                if let Some(version) = overrides.azure_api_version {
                    azure_api_version = version;
                }
                if let Some(tz) = overrides.timezone {
                    timezone = tz;
                }
            }
        }

        Ok(Config {
            azure_openai_endpoint: sanitize_endpoint(&endpoint),
            azure_openai_api_key,
            azure_api_version,
            google_access_token,
            google_calendar_id,
            timezone,
        })
    }

    /// Endpoint with the API version query parameter appended
    pub fn endpoint_with_version(&self) -> String {
        format!(
            "{}?api-version={}",
            self.azure_openai_endpoint, self.azure_api_version
        )
    }

    /// Parse the configured timezone name
    pub fn working_timezone(&self) -> AssistantResult<Tz> {
        self.timezone
            .parse()
            .map_err(|_| config_error(&format!("Invalid timezone: {}", self.timezone)))
    }
}

/// Strip any query string and trailing slashes from a configured endpoint.
/// Deployments sometimes store the endpoint with api-version baked in.
fn sanitize_endpoint(endpoint: &str) -> String {
    let base = endpoint.split('?').next().unwrap_or(endpoint);
    base.trim().trim_end_matches('/').to_string()
}
