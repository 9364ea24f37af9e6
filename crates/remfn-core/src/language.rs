//! Source languages and the wire protocol families that execute them.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("language identifier cannot be empty")]
    EmptyLanguage,

    #[error("unknown function implementation type '{0}'")]
    UnknownImplementationType(String),
}

/// Source language a remote function is written in (`PYTHON`, `JAVA`, ...).
///
/// Identifiers are case-insensitive and stored upper case, so `python` and
/// `PYTHON` name the same language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Language(String);

impl Language {
    pub fn new(name: &str) -> Result<Self, ParseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::EmptyLanguage);
        }
        Ok(Self(name.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire protocol family a remote function implementation is reached over.
///
/// Dispatch has exactly two paths: `Grpc`, and everything else through the
/// Thrift client. `Rest` takes the Thrift path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImplementationType {
    Thrift,
    Grpc,
    Rest,
}

impl ImplementationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImplementationType::Thrift => "THRIFT",
            ImplementationType::Grpc => "GRPC",
            ImplementationType::Rest => "REST",
        }
    }
}

impl FromStr for ImplementationType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "THRIFT" => Ok(ImplementationType::Thrift),
            "GRPC" => Ok(ImplementationType::Grpc),
            "REST" => Ok(ImplementationType::Rest),
            _ => Err(ParseError::UnknownImplementationType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ImplementationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_is_case_insensitive() {
        let lower: Language = "python".parse().unwrap();
        let upper: Language = "PYTHON".parse().unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.as_str(), "PYTHON");
        assert_eq!(Language::new("  go ").unwrap().to_string(), "GO");
    }

    #[test]
    fn test_empty_language_rejected() {
        assert_eq!(Language::new(""), Err(ParseError::EmptyLanguage));
        assert_eq!(Language::new("   "), Err(ParseError::EmptyLanguage));
    }

    #[test]
    fn test_parse_implementation_type() {
        assert_eq!("thrift".parse::<ImplementationType>(), Ok(ImplementationType::Thrift));
        assert_eq!("GRPC".parse::<ImplementationType>(), Ok(ImplementationType::Grpc));
        assert_eq!(" Rest ".parse::<ImplementationType>(), Ok(ImplementationType::Rest));

        let err = "soap".parse::<ImplementationType>().unwrap_err();
        assert_eq!(err, ParseError::UnknownImplementationType("soap".to_string()));
        assert_eq!(err.to_string(), "unknown function implementation type 'soap'");
    }

    #[test]
    fn test_implementation_type_display() {
        assert_eq!(ImplementationType::Grpc.to_string(), "GRPC");
        assert_eq!(ImplementationType::Thrift.to_string(), "THRIFT");
    }
}
