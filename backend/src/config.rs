use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_filter: String,

    // Demo account, seeded at startup
    pub demo_enabled: bool,
    pub demo_email: String,
    pub demo_password: String,
    pub demo_name: String,
    pub demo_department: String,
    pub demo_seed_days: u32,

    // Dashboard windows
    pub chart_window_days: usize,
    pub analytics_window_days: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Reads configuration through `get` so tests never touch the process
    /// environment.
    pub fn from_env_with<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        Self {
            log_filter: get("LOG_FILTER").unwrap_or_else(|| "wellnesstrack=debug".into()),

            demo_enabled: get("DEMO_ENABLED")
                .unwrap_or_else(|| "true".into())
                .parse()
                .unwrap_or(true),
            demo_email: get("DEMO_EMAIL").unwrap_or_else(|| "demo@company.com".into()),
            demo_password: get("DEMO_PASSWORD").unwrap_or_else(|| "demo123".into()),
            demo_name: get("DEMO_NAME").unwrap_or_else(|| "Demo User".into()),
            demo_department: get("DEMO_DEPARTMENT")
                .unwrap_or_else(|| "Demo Department".into()),
            demo_seed_days: get("DEMO_SEED_DAYS")
                .unwrap_or_else(|| "14".into())
                .parse()
                .unwrap_or(14),

            chart_window_days: get("CHART_WINDOW_DAYS")
                .unwrap_or_else(|| "7".into())
                .parse()
                .unwrap_or(7),
            analytics_window_days: get("ANALYTICS_WINDOW_DAYS")
                .unwrap_or_else(|| "14".into())
                .parse()
                .unwrap_or(14),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env_with(|_| None)
    }
}
