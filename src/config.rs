use std::path::PathBuf;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub roster_path: PathBuf,
    pub pretty: bool,
    pub log_filter: String,
}

impl AppConfig {
    /// Reads `GRADEBOOK_*` variables. `roster_arg`, when given, wins over
    /// `GRADEBOOK_ROSTER`, and `RUST_LOG` wins over `GRADEBOOK_LOG`.
    pub fn from_env(roster_arg: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(roster_arg, |key| std::env::var(key).ok())
    }

    fn from_lookup<F>(roster_arg: Option<String>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let roster_path = roster_arg
            .or_else(|| lookup("GRADEBOOK_ROSTER"))
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| ConfigError::MissingRequired("GRADEBOOK_ROSTER".into()))?;

        let pretty = match lookup("GRADEBOOK_PRETTY") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| ConfigError::InvalidValue("GRADEBOOK_PRETTY".into()))?,
            None => true,
        };

        Ok(Self {
            roster_path,
            pretty,
            log_filter: lookup("RUST_LOG")
                .or_else(|| lookup("GRADEBOOK_LOG"))
                .filter(|filter| !filter.trim().is_empty())
                .unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
