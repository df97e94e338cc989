use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::contract::model::MatchPolicy;

/// Configuration for the matching module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchingConfig {
    /// "reciprocal" (default) or "always" (demo mode: every like matches).
    #[serde(default = "default_policy")]
    pub policy: String,
    /// Buffer size of the event fan-out channel.
    #[serde(default = "default_events_buffer")]
    pub events_buffer: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            events_buffer: default_events_buffer(),
        }
    }
}

impl MatchingConfig {
    pub fn match_policy(&self) -> Result<MatchPolicy> {
        MatchPolicy::parse(&self.policy)
            .ok_or_else(|| anyhow!("unknown match policy '{}'", self.policy))
    }
}

fn default_policy() -> String {
    MatchPolicy::Reciprocal.as_str().to_string()
}

fn default_events_buffer() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MatchingConfig::default();
        assert_eq!(config.match_policy().unwrap(), MatchPolicy::Reciprocal);
        assert_eq!(config.events_buffer, 64);
    }

    #[test]
    fn demo_mode_parses() {
        let config: MatchingConfig = serde_json::from_str(r#"{"policy": "always"}"#).unwrap();
        assert_eq!(config.match_policy().unwrap(), MatchPolicy::AlwaysMatch);
    }

    #[test]
    fn unknown_policy_is_an_error() {
        let config: MatchingConfig = serde_json::from_str(r#"{"policy": "maybe"}"#).unwrap();
        assert!(config.match_policy().is_err());
    }
}
