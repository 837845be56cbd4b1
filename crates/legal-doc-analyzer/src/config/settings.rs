use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Keys that have no default and must come from the settings file or the environment.
pub const REQUIRED_KEYS: [&str; 6] = [
    "llm.base_url",
    "llm.api_key",
    "database.host",
    "database.user",
    "database.password",
    "database.name",
];

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Missing required configuration key: {0} (set APP__{1})")]
    MissingKey(&'static str, String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: LlmConfig,
    pub prompts: PromptsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub pool_max_size: u32,
    pub pool_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// No client-side timeout when unset
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PromptsConfig {
    pub analysis_system_prompt: String,
    pub chat_system_prompt: String,
}

impl Settings {
    /// Load `.env`, `config/settings.toml` and `APP__*` environment variables.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let config = Self::builder()?
            .add_source(File::with_name("config/settings").required(false))
            .add_source(Self::environment())
            .build()?;

        Self::from_config(config)
    }

    /// `APP__*` variables, e.g. `APP__DATABASE__PASSWORD=secret`.
    ///
    /// Values stay strings; numeric settings are converted on deserialize,
    /// so secrets like `0123` are never reinterpreted as numbers.
    pub fn environment() -> Environment {
        Environment::with_prefix("APP").separator("__")
    }

    /// Builder pre-populated with every non-required default.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, SettingsError> {
        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.static_dir", "static")?
            .set_default("server.max_upload_bytes", 20 * 1024 * 1024)?
            .set_default("database.port", 5432)?
            .set_default("database.pool_max_size", 1)?
            .set_default("database.pool_timeout_seconds", 30)?
            .set_default("llm.model", "mistralai/Mistral-7B-Instruct-v0.2")?
            .set_default("llm.temperature", 0.5)?
            .set_default("llm.max_tokens", 500)?
            .set_default(
                "prompts.analysis_system_prompt",
                "You are a legal document analysis expert.",
            )?
            .set_default(
                "prompts.chat_system_prompt",
                "You are a legal document assistant.",
            )?;

        Ok(builder)
    }

    /// Validate required keys, then deserialize.
    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        for key in REQUIRED_KEYS {
            match config.get_string(key) {
                Ok(_) => {}
                Err(ConfigError::NotFound(_)) => {
                    let env_name = key.replace('.', "__").to_uppercase();
                    return Err(SettingsError::MissingKey(key, env_name));
                }
                Err(e) => return Err(e.into()),
            }
        }

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_required() -> ConfigBuilder<DefaultState> {
        Settings::builder()
            .unwrap()
            .set_override("llm.base_url", "https://api.together.xyz/v1")
            .unwrap()
            .set_override("llm.api_key", "test-key")
            .unwrap()
            .set_override("database.host", "localhost")
            .unwrap()
            .set_override("database.user", "legal")
            .unwrap()
            .set_override("database.password", "secret")
            .unwrap()
            .set_override("database.name", "legal_docs")
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_optional_keys() {
        let settings = Settings::from_config(with_required().build().unwrap()).unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.port, 5432);
        assert_eq!(settings.database.pool_max_size, 1);
        assert_eq!(settings.llm.model, "mistralai/Mistral-7B-Instruct-v0.2");
        assert_eq!(settings.llm.max_tokens, 500);
        assert!((settings.llm.temperature - 0.5).abs() < f32::EPSILON);
        assert!(settings.llm.timeout_seconds.is_none());
        assert_eq!(
            settings.prompts.chat_system_prompt,
            "You are a legal document assistant."
        );
    }

    #[test]
    fn test_missing_api_key_is_named() {
        let config = Settings::builder()
            .unwrap()
            .set_override("llm.base_url", "http://localhost")
            .unwrap()
            .set_override("database.host", "localhost")
            .unwrap()
            .set_override("database.user", "legal")
            .unwrap()
            .set_override("database.password", "secret")
            .unwrap()
            .set_override("database.name", "legal_docs")
            .unwrap()
            .build()
            .unwrap();

        match Settings::from_config(config) {
            Err(SettingsError::MissingKey(key, env)) => {
                assert_eq!(key, "llm.api_key");
                assert_eq!(env, "LLM__API_KEY");
            }
            other => panic!("expected MissingKey, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_database_keys_fail_fast() {
        let config = Settings::builder()
            .unwrap()
            .set_override("llm.base_url", "http://localhost")
            .unwrap()
            .set_override("llm.api_key", "k")
            .unwrap()
            .build()
            .unwrap();

        let err = Settings::from_config(config).unwrap_err();
        assert!(err.to_string().contains("database.host"));
    }

    #[test]
    fn test_numeric_looking_secrets_from_env_are_kept_verbatim() {
        let vars: config::Map<String, String> = [
            ("APP__LLM__BASE_URL", "https://api.together.xyz/v1"),
            ("APP__LLM__API_KEY", "00042"),
            ("APP__DATABASE__HOST", "localhost"),
            ("APP__DATABASE__USER", "legal"),
            ("APP__DATABASE__PASSWORD", "0123"),
            ("APP__DATABASE__NAME", "legal_docs"),
            ("APP__SERVER__PORT", "9090"),
            ("APP__LLM__TEMPERATURE", "0.2"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Settings::builder()
            .unwrap()
            .add_source(Settings::environment().source(Some(vars)))
            .build()
            .unwrap();
        let settings = Settings::from_config(config).unwrap();

        assert_eq!(settings.database.password, "0123");
        assert_eq!(settings.llm.api_key, "00042");
        assert_eq!(settings.server.port, 9090);
        assert!((settings.llm.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let config = with_required()
            .set_override("llm.timeout_seconds", 45)
            .unwrap()
            .set_override("server.port", 9000)
            .unwrap()
            .build()
            .unwrap();

        let settings = Settings::from_config(config).unwrap();
        assert_eq!(settings.llm.timeout_seconds, Some(45));
        assert_eq!(settings.server.port, 9000);
    }
}
