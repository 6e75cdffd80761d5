use std::env;

/// Provider credentials and service settings, read from the process
/// environment once at startup and shared via Rocket managed state.
/// Routes never touch `env::var` directly; `boot::run` verifies the
/// required credentials before the server launches.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub perplexity_api_key: String,
    pub gemini_api_key: String,
    pub stability_api_key: String,
    pub dataforseo_login: String,
    pub dataforseo_password: String,
    /// Origins allowed by the CORS fairing.
    pub allowed_origins: Vec<String>,
    /// Directory where unrecoverable provider payloads are dumped.
    pub failure_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let origins = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| {
            "http://localhost:3000,http://127.0.0.1:3000,http://localhost:5173,http://127.0.0.1:5173"
                .to_string()
        });

        AppConfig {
            perplexity_api_key: env::var("PERPLEXITY_API_KEY").unwrap_or_default(),
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            stability_api_key: env::var("STABILITY_API_KEY").unwrap_or_default(),
            dataforseo_login: env::var("DFSEO_LOGIN").unwrap_or_default(),
            dataforseo_password: env::var("DFSEO_PASSWORD").unwrap_or_default(),
            allowed_origins: origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            failure_dir: env::var("FAILURE_DIR").unwrap_or_else(|_| "failures".to_string()),
        }
    }

    /// Environment variables that must be set for every endpoint to work.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.perplexity_api_key.is_empty() {
            missing.push("PERPLEXITY_API_KEY");
        }
        if self.gemini_api_key.is_empty() {
            missing.push("GEMINI_API_KEY");
        }
        if self.stability_api_key.is_empty() {
            missing.push("STABILITY_API_KEY");
        }
        if self.dataforseo_login.is_empty() {
            missing.push("DFSEO_LOGIN");
        }
        if self.dataforseo_password.is_empty() {
            missing.push("DFSEO_PASSWORD");
        }
        missing
    }
}
