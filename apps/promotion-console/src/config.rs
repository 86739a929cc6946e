use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Admin console for the Promotion service", long_about = None)]
pub struct ConsoleConfig {
    /// Promotion service base URL (e.g. http://promotions.internal:8080)
    #[arg(long, env = "PROMOTIONS_URL", default_value = "http://localhost:8080")]
    pub service_url: String,

    /// Port the console listens on
    #[arg(long, env = "LISTEN_PORT", default_value_t = 3000)]
    pub listen_port: u16,

    /// Seconds before an outstanding request to the service is abandoned
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Seconds a browser session's console survives without a request
    #[arg(long, env = "SESSION_IDLE_SECS", default_value_t = 24 * 60 * 60)]
    pub session_idle_secs: u64,
}

impl ConsoleConfig {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::parse();
        config.service_url = normalize_url(&config.service_url);
        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }
}

/// Adds a scheme when missing and drops trailing slashes.
pub fn normalize_url(raw: &str) -> String {
    let mut url = raw.trim().to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        url = format!("http://{}", url);
    }
    while url.ends_with('/') {
        url.pop();
    }
    url
}
