use geoproc_core::config::{LayeredConfig, DEFAULT_CONFIG_FILE};
use geoproc_core::ProcessingDefaults;
use std::env;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub processing: ProcessingDefaults,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Processing defaults are layered the same way as for the CLI:
    /// `geoproc.toml` in the working directory, then `GEOPROC_*` variables.
    pub fn from_env() -> geoproc_core::Result<Self> {
        let port = env::var("GEOPROC_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3002);

        let cors_origin =
            env::var("GEOPROC_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let processing = LayeredConfig::with_defaults()
            .load_from_optional_file(DEFAULT_CONFIG_FILE)?
            .load_from_env()
            .processing_defaults();

        Ok(Self { port, cors_origin, processing })
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var("GEOPROC_PORT", "8080");
        env::set_var("GEOPROC_EXTRUDE_HEIGHT", "2.5");
        env::remove_var("GEOPROC_CORS_ORIGIN");

        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.processing.extrude_height, 2.5);

        env::remove_var("GEOPROC_PORT");
        env::remove_var("GEOPROC_EXTRUDE_HEIGHT");
    }

    #[test]
    #[serial]
    fn test_invalid_port_falls_back() {
        env::set_var("GEOPROC_PORT", "not-a-port");
        assert_eq!(ApiConfig::from_env().unwrap().port, 3002);
        env::remove_var("GEOPROC_PORT");
    }
}
