//! Deployment environment, which picks the `{environment}.toml` layer.

use std::fmt;
use std::str::FromStr;

use crate::config::error::ConfigError;

/// Which environment file is layered over `default.toml`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

/// Canonical name first, then accepted aliases
const NAMES: &[(Environment, &[&str])] = &[
    (Environment::Development, &["development", "dev"]),
    (Environment::Test, &["test"]),
    (Environment::Staging, &["staging", "stage"]),
    (Environment::Production, &["production", "prod"]),
];

impl Environment {
    /// Variable consulted by [`Environment::from_env`]
    pub const ENV_VAR: &'static str = "DEVOPS_RELAY_APP_ENV";

    /// Environment named by `DEVOPS_RELAY_APP_ENV`; unset or unknown values
    /// fall back to development.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        NAMES
            .iter()
            .find(|(env, _)| env == self)
            .map(|(_, names)| names[0])
            .unwrap_or("development")
    }

    /// File name of this environment's layer, e.g. `production.toml`
    pub fn config_file_name(&self) -> String {
        format!("{}.toml", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        NAMES
            .iter()
            .find(|(_, names)| names.contains(&wanted.as_str()))
            .map(|(env, _)| *env)
            .ok_or_else(|| {
                let valid: Vec<&str> = NAMES.iter().map(|(_, names)| names[0]).collect();
                ConfigError::EnvVarError(format!(
                    "{} '{}' is not one of: {}",
                    Self::ENV_VAR,
                    s,
                    valid.join(", ")
                ))
            })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        let cases = [
            ("development", Environment::Development),
            ("dev", Environment::Development),
            ("test", Environment::Test),
            ("staging", Environment::Staging),
            ("stage", Environment::Staging),
            ("production", Environment::Production),
            ("prod", Environment::Production),
            (" PROD ", Environment::Production),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<Environment>().unwrap(), expected, "{:?}", input);
        }
    }

    #[test]
    fn canonical_name_round_trips() {
        for (env, _) in NAMES {
            assert_eq!(env.as_str().parse::<Environment>().unwrap(), *env);
            assert_eq!(env.to_string(), env.as_str());
        }
    }

    #[test]
    fn config_file_name_uses_canonical_name() {
        assert_eq!(Environment::Staging.config_file_name(), "staging.toml");
        assert_eq!(Environment::default().config_file_name(), "development.toml");
    }

    #[test]
    fn unknown_value_lists_valid_names() {
        let err = "qa".parse::<Environment>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("DEVOPS_RELAY_APP_ENV"));
        assert!(message.contains("development, test, staging, production"));
    }
}
