use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub store_url: String,
    pub store_anon_key: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub boards_path: PathBuf,
    pub store_timeout_secs: u64,
    pub rankings_fetch_limit: u32,
    pub history_window_days: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("store_url", &self.store_url)
            .field("store_anon_key", &"[redacted]")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("boards_path", &self.boards_path)
            .field("store_timeout_secs", &self.store_timeout_secs)
            .field("rankings_fetch_limit", &self.rankings_fetch_limit)
            .field("history_window_days", &self.history_window_days)
            .finish()
    }
}
