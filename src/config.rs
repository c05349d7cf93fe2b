/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub uploads_dir: String,
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(3000),
            uploads_dir: std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "public/uploads".into()),
            mongodb_uri: std::env::var("MONGODB_URI").ok(),
            mongodb_database: std::env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "database".into()),
        }
    }
}
