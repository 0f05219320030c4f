use std::env;

pub mod cors;

pub use cors::create_cors_layer;

const DEFAULT_PORT: u16 = 3000;

/// Local fallback store used when no DATABASE_URL is provided.
const DEFAULT_DATABASE_URL: &str = "sqlite:///tmp/contacts.db?mode=rwc";

pub struct Config {
    pub database_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}
