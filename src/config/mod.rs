use dotenv::dotenv;
use std::env;
use std::time::Duration;

/// Runtime configuration. Everything has a default; no external services are
/// required. The delay values pace the mock processing steps and are fixed
/// constants at runtime, not timeouts.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub query_delay: Duration,
    pub translate_delay: Duration,
    pub consultant_delay: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a valid port number"),
            query_delay: millis_from_env("QUERY_DELAY_MS", 500),
            translate_delay: millis_from_env("TRANSLATE_DELAY_MS", 1500),
            consultant_delay: millis_from_env("CONSULTANT_DELAY_MS", 100),
        }
    }
}

fn millis_from_env(key: &str, default: u64) -> Duration {
    let ms = env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default);
    Duration::from_millis(ms)
}
