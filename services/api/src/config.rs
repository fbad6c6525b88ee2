use pitch_coach_core::session::SessionTimeouts;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub openai_api_key: String,
    pub openai_api_base: String,
    pub chat_model: String,
    pub transcription_model: String,
    pub transcription_language: String,
    pub generation_timeout: Duration,
    pub reply_timeout: Duration,
    pub log_level: Level,
    pub static_dir: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))?;

        let openai_api_base = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let chat_model = std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let transcription_model = std::env::var("TRANSCRIPTION_MODEL")
            .unwrap_or_else(|_| "gpt-4o-mini-transcribe".to_string());

        let transcription_language =
            std::env::var("TRANSCRIPTION_LANGUAGE").unwrap_or_else(|_| "en".to_string());

        let generation_timeout = seconds_var("GENERATION_TIMEOUT_SECS", 120)?;
        let reply_timeout = seconds_var("REPLY_TIMEOUT_SECS", 900)?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./static"));

        Ok(Self {
            bind_address,
            openai_api_key,
            openai_api_base,
            chat_model,
            transcription_model,
            transcription_language,
            generation_timeout,
            reply_timeout,
            log_level,
            static_dir,
        })
    }

    pub fn session_timeouts(&self) -> SessionTimeouts {
        SessionTimeouts {
            generation: self.generation_timeout,
            reply: self.reply_timeout,
        }
    }
}

/// Reads a positive whole number of seconds, falling back to `default`.
fn seconds_var(name: &str, default: u64) -> Result<Duration, ConfigError> {
    let secs = match std::env::var(name) {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(name.to_string(), format!("'{}' is not a number", raw))
        })?,
        Err(_) => default,
    };
    if secs == 0 {
        return Err(ConfigError::InvalidValue(
            name.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tracing::Level;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("BIND_ADDRESS");
            env::remove_var("OPENAI_API_KEY");
            env::remove_var("OPENAI_API_BASE");
            env::remove_var("CHAT_MODEL");
            env::remove_var("TRANSCRIPTION_MODEL");
            env::remove_var("TRANSCRIPTION_LANGUAGE");
            env::remove_var("GENERATION_TIMEOUT_SECS");
            env::remove_var("REPLY_TIMEOUT_SECS");
            env::remove_var("RUST_LOG");
            env::remove_var("STATIC_DIR");
        }
    }

    #[test]
    fn test_config_error_display() {
        let missing_var = ConfigError::MissingVar("TEST_VAR".to_string());
        assert_eq!(
            format!("{}", missing_var),
            "Missing environment variable: TEST_VAR"
        );

        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    #[serial]
    fn test_config_from_env_minimal() {
        clear_env_vars();
        unsafe {
            env::set_var("OPENAI_API_KEY", "test-openai-key");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:8000");
        assert_eq!(config.openai_api_key, "test-openai-key");
        assert_eq!(config.openai_api_base, "https://api.openai.com/v1");
        assert_eq!(config.chat_model, "gpt-4o-mini");
        assert_eq!(config.transcription_model, "gpt-4o-mini-transcribe");
        assert_eq!(config.transcription_language, "en");
        assert_eq!(config.generation_timeout, Duration::from_secs(120));
        assert_eq!(config.reply_timeout, Duration::from_secs(900));
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.static_dir, PathBuf::from("./static"));
    }

    #[test]
    #[serial]
    fn test_config_from_env_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "127.0.0.1:8080");
            env::set_var("OPENAI_API_KEY", "custom-openai-key");
            env::set_var("OPENAI_API_BASE", "http://localhost:11434/v1");
            env::set_var("CHAT_MODEL", "gpt-4o");
            env::set_var("TRANSCRIPTION_MODEL", "whisper-1");
            env::set_var("TRANSCRIPTION_LANGUAGE", "de");
            env::set_var("GENERATION_TIMEOUT_SECS", "30");
            env::set_var("REPLY_TIMEOUT_SECS", "60");
            env::set_var("RUST_LOG", "debug");
            env::set_var("STATIC_DIR", "/srv/static");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
        assert_eq!(config.openai_api_key, "custom-openai-key");
        assert_eq!(config.openai_api_base, "http://localhost:11434/v1");
        assert_eq!(config.chat_model, "gpt-4o");
        assert_eq!(config.transcription_model, "whisper-1");
        assert_eq!(config.transcription_language, "de");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));

        let timeouts = config.session_timeouts();
        assert_eq!(timeouts.generation, Duration::from_secs(30));
        assert_eq!(timeouts.reply, Duration::from_secs(60));
    }

    #[test]
    #[serial]
    fn test_config_missing_openai_key() {
        clear_env_vars();

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::MissingVar(var) => assert_eq!(var, "OPENAI_API_KEY"),
            _ => panic!("Expected MissingVar for OPENAI_API_KEY"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_bind_address() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "not-a-valid-address");
            env::set_var("OPENAI_API_KEY", "test-openai-key");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "BIND_ADDRESS"),
            _ => panic!("Expected InvalidValue for BIND_ADDRESS"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_log_level() {
        clear_env_vars();
        unsafe {
            env::set_var("OPENAI_API_KEY", "test-openai-key");
            env::set_var("RUST_LOG", "not-a-level");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "RUST_LOG"),
            _ => panic!("Expected InvalidValue for RUST_LOG"),
        }
    }

    #[test]
    #[serial]
    fn test_config_rejects_bad_timeouts() {
        clear_env_vars();
        unsafe {
            env::set_var("OPENAI_API_KEY", "test-openai-key");
            env::set_var("REPLY_TIMEOUT_SECS", "soon");
        }
        match Config::from_env().unwrap_err() {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "REPLY_TIMEOUT_SECS"),
            _ => panic!("Expected InvalidValue for REPLY_TIMEOUT_SECS"),
        }

        unsafe {
            env::remove_var("REPLY_TIMEOUT_SECS");
            env::set_var("GENERATION_TIMEOUT_SECS", "0");
        }
        match Config::from_env().unwrap_err() {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "GENERATION_TIMEOUT_SECS"),
            _ => panic!("Expected InvalidValue for GENERATION_TIMEOUT_SECS"),
        }
    }
}
