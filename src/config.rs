//! Configuration
//! Mission: Environment-driven service configuration with sane defaults

use std::env;

/// Service configuration, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub private_key_path: String,
    pub public_key_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr =
            env::var("CAKESHOP_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let private_key_path =
            env::var("CAKESHOP_PRIVATE_KEY").unwrap_or_else(|_| "privkey.der".to_string());
        let public_key_path =
            env::var("CAKESHOP_PUBLIC_KEY").unwrap_or_else(|_| "pubkey.b64".to_string());

        Self {
            bind_addr,
            private_key_path,
            public_key_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_unset() {
        let config = Config::from_env();
        assert!(!config.bind_addr.is_empty());
        assert!(!config.private_key_path.is_empty());
        assert!(!config.public_key_path.is_empty());
    }
}
