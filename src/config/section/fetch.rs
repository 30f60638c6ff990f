//! `[fetch]` section configuration.
//!
//! Remote stylesheets (`<link href="https://...">`) that are not found locally
//! are downloaded, their `url(...)` references made absolute, and inlined.
//!
//! ```toml
//! [fetch]
//! enable = true
//! timeout_ms = 10000
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Allow fetching remote stylesheets.
    pub enable: bool,

    /// Connect/read timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            enable: true,
            timeout_ms: 10_000,
        }
    }
}

impl FetchConfig {
    pub const TIMEOUT_MS: FieldPath = FieldPath::new("fetch.timeout_ms");

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.enable && self.timeout_ms == 0 {
            diag.error_with_hint(
                Self::TIMEOUT_MS,
                "timeout must be greater than zero",
                "a stalled fetch blocks the whole render; try 10000",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.fetch.enable);
        assert_eq!(config.fetch.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = test_parse_config("[fetch]\ntimeout_ms = 0");
        let mut diag = ConfigDiagnostics::new();
        config.fetch.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
