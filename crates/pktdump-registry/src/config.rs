// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discovery configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the dump file, relative to the working directory.
pub const DEFAULT_DUMP_PATH: &str = "pkt_dump.txt";

/// Discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Record packets whose opcode has no typed decoder (default: false)
    pub dump_unknown: bool,

    /// Location of the dump file
    pub dump_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dump_unknown: false,
            dump_path: PathBuf::from(DEFAULT_DUMP_PATH),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Config builder for fluent API
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    dump_unknown: Option<bool>,
    dump_path: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Enable or disable discovery of unknown packets
    pub fn dump_unknown(mut self, enabled: bool) -> Self {
        self.dump_unknown = Some(enabled);
        self
    }

    /// Set the dump file location
    pub fn dump_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dump_path = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        let defaults = Config::default();

        Config {
            dump_unknown: self.dump_unknown.unwrap_or(defaults.dump_unknown),
            dump_path: self.dump_path.unwrap_or(defaults.dump_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = Config::builder()
            .dump_unknown(true)
            .dump_path("/tmp/dump.txt")
            .build();

        assert!(config.dump_unknown);
        assert_eq!(config.dump_path, PathBuf::from("/tmp/dump.txt"));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();

        assert!(!config.dump_unknown);
        assert_eq!(config.dump_path, PathBuf::from(DEFAULT_DUMP_PATH));
    }
}
