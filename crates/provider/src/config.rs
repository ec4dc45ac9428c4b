// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(3);

/// Configuration for the workspace info provider.
///
/// Durations serialize as human strings ("10s", "3s", "500ms").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    /// Target address (host:port) of the workspace manager.
    pub ws_manager_addr: String,
    /// Sleep between reconnect attempts after the stream drops.
    #[serde(with = "duration_str")]
    pub reconnect_interval: Duration,
    /// Tick of the on-demand refresh coordinator.
    #[serde(with = "duration_str", default = "default_refresh_interval")]
    pub refresh_interval: Duration,
}

fn default_refresh_interval() -> Duration {
    DEFAULT_REFRESH_INTERVAL
}

impl ProviderConfig {
    /// Validate the configuration to catch issues during startup and not at
    /// runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ws_manager_addr.is_empty() {
            return Err(ConfigError::ManagerAddrRequired);
        }
        Ok(())
    }
}

/// Configuration errors, fatal at startup.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("ws_manager_addr must not be empty")]
    ManagerAddrRequired,

    #[error("invalid duration: {0}")]
    InvalidDuration(String),
}

/// Parse a duration string like "500ms", "30s", "5m", "1h" into a Duration.
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ConfigError::InvalidDuration("empty duration string".to_string()));
    }

    // Find the numeric prefix
    let (num_str, suffix) = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| (&s[..i], &s[i..]))
        .unwrap_or((s, ""));

    let num: u64 = num_str
        .parse()
        .map_err(|_| ConfigError::InvalidDuration(format!("invalid number in duration: {}", s)))?;

    let multiplier = match suffix.trim() {
        "ms" | "millis" | "millisecond" | "milliseconds" => {
            return Ok(Duration::from_millis(num));
        }
        "" | "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "m" | "min" | "mins" | "minute" | "minutes" => 60,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3600,
        "d" | "day" | "days" => 86400,
        other => {
            return Err(ConfigError::InvalidDuration(format!("unknown duration suffix: {}", other)))
        }
    };

    Ok(Duration::from_secs(num * multiplier))
}

/// Format a duration the way `parse_duration` reads it back.
fn format_duration(d: &Duration) -> String {
    let ms = d.as_millis();
    if ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{}ms", ms)
    }
}

mod duration_str {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_duration(d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
