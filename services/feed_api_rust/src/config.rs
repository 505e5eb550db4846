//! Service configuration from environment variables.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        env::remove_var("HTTP_PORT");
        let config = Config::from_env();
        assert_eq!(config.http_port, 8080);
    }
}
