use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: PathBuf,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Defaults, then an optional `configuration.{toml,yaml,json}`, then `TRIVIA_*` variables
/// such as `TRIVIA_APPLICATION__PORT`.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    dotenv::dotenv().ok();
    load(environment())
}

fn environment() -> Environment {
    Environment::with_prefix("TRIVIA")
        .prefix_separator("_")
        .separator("__")
}

fn load(env: Environment) -> Result<Settings, ConfigError> {
    Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 8080)?
        .set_default("database.path", "trivia.db")?
        .add_source(File::with_name("configuration").required(false))
        .add_source(env)
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> Environment {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(vars))
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let settings = load(env_from(&[])).unwrap();
        assert_eq!(settings.application.address(), "0.0.0.0:8080");
        assert_eq!(settings.database.path, PathBuf::from("trivia.db"));
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = load(env_from(&[
            ("TRIVIA_APPLICATION__PORT", "5000"),
            ("TRIVIA_DATABASE__PATH", "/tmp/quiz.db"),
        ]))
        .unwrap();
        assert_eq!(settings.application.port, 5000);
        assert_eq!(settings.database.path, PathBuf::from("/tmp/quiz.db"));
    }

    #[test]
    fn invalid_port_is_an_error() {
        assert!(load(env_from(&[("TRIVIA_APPLICATION__PORT", "eighty")])).is_err());
    }
}
