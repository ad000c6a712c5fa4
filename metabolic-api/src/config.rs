use std::env;

use dotenv::dotenv;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

pub struct Config {
    pub bind_address: String,
}

impl Config {
    /// Reads `BIND_ADDRESS` from the environment or a `.env` file.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self {
            bind_address: env::var("BIND_ADDRESS")
                .ok()
                .filter(|address| !address.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned()),
        }
    }
}
