use serde::Deserialize;

/// Main configuration structure for the auditor
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub quota: QuotaConfig,
}

/// Bot identification sent with every audit request
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the bot
    #[serde(rename = "bot-name")]
    pub bot_name: String,

    /// Version of the bot
    #[serde(rename = "bot-version")]
    pub bot_version: String,

    /// URL with information about the bot
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.bot_name, self.bot_version, self.contact_url
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            bot_name: "SEOBot".to_string(),
            bot_version: "1.0".to_string(),
            contact_url: "https://example.com/bot".to_string(),
        }
    }
}

/// HTTP fetch limits
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

/// Per-user audit limits
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaConfig {
    /// Audits a single user may run per UTC day
    #[serde(rename = "daily-audits-per-user", default = "default_daily_audits")]
    pub daily_audits_per_user: u32,
}

fn default_daily_audits() -> u32 {
    5
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            daily_audits_per_user: default_daily_audits(),
        }
    }
}
