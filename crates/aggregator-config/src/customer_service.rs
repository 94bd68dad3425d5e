use std::time::Duration;

use serde::{Deserialize, Deserializer};
use url::Url;

/// Connection settings for the remote customer service
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerServiceConfig {
    /// Base URL that `/customers/...` paths are appended to
    pub base_url: Url,
    /// Total time allowed per call (e.g. `"5s"`)
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    /// Time allowed to connect (e.g. `"500ms"`)
    #[serde(default = "default_connect_timeout", deserialize_with = "deserialize_duration")]
    pub connect_timeout: Duration,
    /// Overrides the HTTP `User-Agent` header
    #[serde(default)]
    pub user_agent: Option<String>,
}

const fn default_timeout() -> Duration {
    Duration::from_secs(5)
}

const fn default_connect_timeout() -> Duration {
    Duration::from_secs(2)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    duration_str::parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid duration '{raw}': {e}")))
}
