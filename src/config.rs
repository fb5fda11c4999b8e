use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_path: String,
    pub port: u16,
    pub archive_api_base: String,
    pub archive_web_base: String,
    pub urn_resolver_base: String,
    pub cors_allowed_origins: Vec<String>,
    pub review_cache_size: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/translations.db".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            archive_api_base: env::var("ARCHIVE_API_BASE")
                .unwrap_or_else(|_| "https://api.nb.no".to_string()),
            archive_web_base: env::var("ARCHIVE_WEB_BASE")
                .unwrap_or_else(|_| "https://www.nb.no".to_string()),
            urn_resolver_base: env::var("URN_RESOLVER_BASE")
                .unwrap_or_else(|_| "https://urn.nb.no".to_string()),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(Vec::new),
            review_cache_size: env::var("REVIEW_CACHE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256),
        }
    }
}
