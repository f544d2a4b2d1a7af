/// Server configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to (`SKF_LISTEN_ADDR`).
    pub listen_addr: String,
    /// Path of the SQLite database file (`SKF_DB_PATH`).
    pub db_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("SKF_LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            db_path: std::env::var("SKF_DB_PATH")
                .unwrap_or_else(|_| "data/skinfolio.db".to_string()),
        }
    }
}
