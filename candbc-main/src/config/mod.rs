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

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};

pub mod configfile;

/// Loads the configuration from a file specified by the
/// `CANDBC_CONFIG_FILE` environment variable, defaulting to
/// `candbc.toml`. Values merge over the defaults, environment variables
/// prefixed with `CANDBC` merge last.
/// # Errors
/// Returns an error message if the configuration cannot be parsed.
pub fn load_config() -> Result<configfile::Configuration, String> {
    let config_file =
        std::env::var("CANDBC_CONFIG_FILE").unwrap_or_else(|_| "candbc.toml".to_owned());

    Figment::from(Serialized::defaults(default_config()))
        .merge(Toml::file(&config_file))
        .merge(Env::prefixed("CANDBC").ignore(&["CANDBC_CONFIG_FILE"]))
        .extract()
        .map_err(|e| format!("Failed to build configuration: {e}"))
}

#[must_use]
pub fn default_config() -> configfile::Configuration {
    configfile::Configuration::default()
}
