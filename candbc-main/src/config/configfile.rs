/*
 * Copyright (c) 2026 The Contributors to candbc (see CONTRIBUTORS)
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 */
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Configuration {
    /// Schema file used when the command line does not name one.
    pub database_path: String,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct LoggingConfig {
    /// Default tracing filter directive, overridable via `RUST_LOG`.
    pub level: String,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct OutputConfig {
    /// Prefer enum labels over the raw unit string in text output.
    pub resolve_labels: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            database_path: "database.json".to_owned(),
            logging: LoggingConfig {
                level: "info".to_owned(),
            },
            output: OutputConfig {
                resolve_labels: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    use super::*;

    #[test]
    fn load_config_toml() -> Result<(), Box<dyn std::error::Error>> {
        let config_str = r#"
database_path = "/data/vehicle.json"

[logging]
level = "debug"

[output]
resolve_labels = false
"#;

        let figment = Figment::from(Serialized::defaults(Configuration::default()))
            .merge(Toml::string(config_str));
        let config: Configuration = figment.extract()?;
        assert_eq!(config.database_path, "/data/vehicle.json");
        assert_eq!(config.logging.level, "debug");
        assert!(!config.output.resolve_labels);
        Ok(())
    }

    #[test]
    fn defaults_apply_when_file_is_partial() -> Result<(), Box<dyn std::error::Error>> {
        let figment = Figment::from(Serialized::defaults(Configuration::default()))
            .merge(Toml::string(r#"database_path = "other.json""#));
        let config: Configuration = figment.extract()?;
        assert_eq!(config.database_path, "other.json");
        assert_eq!(config.logging.level, "info");
        assert!(config.output.resolve_labels);
        Ok(())
    }
}
