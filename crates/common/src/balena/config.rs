/// Connection settings for the balena API.
#[derive(Debug, Clone)]
pub struct BalenaConfig {
    /// Base URL of the balena API, e.g. `https://api.balena-cloud.com`.
    pub api_url: String,
    /// API key presented as the bearer credential on every call.
    pub api_key: String,
}
