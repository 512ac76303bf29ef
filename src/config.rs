use std::env;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Data API the render backends fetch from
    pub data_api_base_url: String,

    // Chart settings
    pub readings_window_days: i64,
    pub panel_width: u32,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a chart setting is set but out of range
    /// (`READINGS_WINDOW_DAYS` must lie in `1..=MAX_OFFSET_DAYS`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let readings_window_days: i64 = env::var("READINGS_WINDOW_DAYS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);
        if !crate::window::is_valid_offset(readings_window_days) {
            return Err(ConfigError::Invalid("READINGS_WINDOW_DAYS"));
        }

        let panel_width: u32 = env::var("PANEL_WIDTH")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .unwrap_or(1000);
        if panel_width == 0 {
            return Err(ConfigError::Invalid("PANEL_WIDTH"));
        }

        Ok(Self {
            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),

            data_api_base_url: env::var("DATA_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),

            readings_window_days,
            panel_width,

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8000,
            data_api_base_url: "http://localhost:8000".to_string(),
            readings_window_days: 5,
            panel_width: 1000,
            deployment: Deployment::Local,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
