//! Object model configuration.
//!
//! Currently this only bounds prototype chain walks. The process-wide instance is read once from
//! the environment the first time the object protocol needs it.

use std::env;

use tracing::warn;

pub const MAX_PROTO_DEPTH_ENV: &str = "JUST_TYPES_MAX_PROTO_DEPTH";

pub const DEFAULT_MAX_PROTO_DEPTH: usize = 10_000;

lazy_static! {
    static ref CONFIG: ObjectModelConfig = ObjectModelConfig::from_env();
}

/// Returns the process-wide configuration.
pub fn config() -> &'static ObjectModelConfig {
    &CONFIG
}

/// Configuration for the object model.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectModelConfig {
    /// Maximum number of prototype links followed by a lookup. None means unlimited; cycles are
    /// still detected.
    pub max_prototype_depth: Option<usize>,
}

impl ObjectModelConfig {
    /// Create a configuration with no depth limit.
    pub fn unlimited() -> Self {
        ObjectModelConfig {
            max_prototype_depth: None,
        }
    }

    /// Create a configuration with a depth limit.
    pub fn with_limit(max_prototype_depth: usize) -> Self {
        ObjectModelConfig {
            max_prototype_depth: Some(max_prototype_depth),
        }
    }

    /// Read the configuration from `JUST_TYPES_MAX_PROTO_DEPTH`.
    ///
    /// Accepts a positive integer or `unlimited`. Anything else falls back to the default.
    pub fn from_env() -> Self {
        match env::var(MAX_PROTO_DEPTH_ENV) {
            Ok(raw) => Self::parse(&raw).unwrap_or_else(|| {
                warn!(
                    value = raw.as_str(),
                    "Ignoring malformed {}, using default", MAX_PROTO_DEPTH_ENV
                );
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("unlimited") {
            return Some(Self::unlimited());
        }
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => Some(Self::with_limit(n)),
            _ => None,
        }
    }

    /// Check if a walk that has followed `depth` prototype links may continue.
    pub fn allows_depth(&self, depth: usize) -> bool {
        match self.max_prototype_depth {
            Some(max) => depth <= max,
            None => true,
        }
    }
}

impl Default for ObjectModelConfig {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_PROTO_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(
            ObjectModelConfig::parse("64"),
            Some(ObjectModelConfig::with_limit(64))
        );
        assert_eq!(
            ObjectModelConfig::parse(" Unlimited "),
            Some(ObjectModelConfig::unlimited())
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(ObjectModelConfig::parse("0"), None);
        assert_eq!(ObjectModelConfig::parse("-3"), None);
        assert_eq!(ObjectModelConfig::parse("deep"), None);
    }

    #[test]
    fn test_allows_depth() {
        let limited = ObjectModelConfig::with_limit(2);
        assert!(limited.allows_depth(2));
        assert!(!limited.allows_depth(3));
        assert!(ObjectModelConfig::unlimited().allows_depth(usize::MAX));
    }
}
