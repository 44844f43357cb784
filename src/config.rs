use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment ("production" restricts CORS)
    #[serde(default = "default_app_env")]
    pub app_env: String,

    /// Comma-separated list of origins allowed in production
    #[serde(default)]
    pub allowed_origins: String,

    /// Path of the JSON file holding the cached podcast catalog
    #[serde(default = "default_catalog_cache_path")]
    pub catalog_cache_path: String,

    /// Age after which the cached catalog is refreshed
    #[serde(default = "default_catalog_ttl_secs")]
    pub catalog_ttl_secs: u64,

    /// Upper bound on a single external catalog fetch
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Apple top-podcasts feed (business genre)
    #[serde(default = "default_itunes_feed_url")]
    pub itunes_feed_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5002
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_catalog_cache_path() -> String {
    "podcasts.json".to_string()
}

fn default_catalog_ttl_secs() -> u64 {
    86400 // 24 hours
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_itunes_feed_url() -> String {
    "https://itunes.apple.com/us/rss/toppodcasts/limit=100/genre=1321/json".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Origins accepted by CORS in production, blanks dropped
    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            app_env: default_app_env(),
            allowed_origins: String::new(),
            catalog_cache_path: default_catalog_cache_path(),
            catalog_ttl_secs: default_catalog_ttl_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            itunes_feed_url: default_itunes_feed_url(),
        }
    }
}
