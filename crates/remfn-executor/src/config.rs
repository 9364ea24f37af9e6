//! Executor configuration from environment variables.

use std::collections::HashMap;

use anyhow::{Context, Result};
use remfn_core::{ImplementationType, Language, ParseError};
use thiserror::Error;

pub const SUPPORTED_LANGUAGES_VAR: &str = "REMFN_SUPPORTED_LANGUAGES";
pub const THRIFT_ENABLED_VAR: &str = "REMFN_THRIFT_ENABLED";
pub const GRPC_ENABLED_VAR: &str = "REMFN_GRPC_ENABLED";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("malformed language mapping '{0}', expected LANGUAGE=TYPE")]
    MalformedEntry(String),

    #[error("language '{0}' is mapped more than once")]
    DuplicateLanguage(Language),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Language -> implementation type table, fixed for the process lifetime.
    pub supported_languages: HashMap<Language, ImplementationType>,
    /// Whether the embedding process should build a Thrift client.
    pub thrift_enabled: bool,
    /// Whether the embedding process should build a gRPC client.
    pub grpc_enabled: bool,
}

impl ExecutorConfig {
    pub fn from_env() -> Result<Self> {
        let supported_languages = match std::env::var(SUPPORTED_LANGUAGES_VAR) {
            Ok(value) => Self::parse_supported_languages(&value)
                .with_context(|| format!("Invalid {SUPPORTED_LANGUAGES_VAR}"))?,
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            supported_languages,
            thrift_enabled: std::env::var(THRIFT_ENABLED_VAR)
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .with_context(|| format!("Invalid {THRIFT_ENABLED_VAR}"))?,
            grpc_enabled: std::env::var(GRPC_ENABLED_VAR)
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .with_context(|| format!("Invalid {GRPC_ENABLED_VAR}"))?,
        })
    }

    /// Parse a `LANGUAGE=TYPE[,LANGUAGE=TYPE...]` list, e.g.
    /// `python=THRIFT, go=GRPC`. Empty entries are ignored.
    pub fn parse_supported_languages(
        value: &str,
    ) -> std::result::Result<HashMap<Language, ImplementationType>, ConfigError> {
        let mut languages = HashMap::new();
        for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (language, implementation_type) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedEntry(entry.to_string()))?;
            let language = Language::new(language)?;
            let implementation_type = implementation_type.parse::<ImplementationType>()?;
            if languages.contains_key(&language) {
                return Err(ConfigError::DuplicateLanguage(language));
            }
            languages.insert(language, implementation_type);
        }
        Ok(languages)
    }
}
