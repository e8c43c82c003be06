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

//! Raw serde view of the JSON schema document.
//!
//! Field name drift between schema revisions (`bitstart` vs `bit_start`,
//! `scale` vs `factor`, `multiplexor`/`multiplexing` vs the long forms)
//! is absorbed here through serde aliases, so the rest of the crate only
//! ever sees the normalized model in [`crate::datatypes`].

use hashbrown::HashMap;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct DatabaseSchema {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub version: String,
    pub messages: HashMap<String, MessageSchema>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageSchema {
    pub name: String,
    pub sender: String,
    pub length: usize,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub signals: HashMap<String, SignalSchema>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignalSchema {
    #[serde(alias = "bitstart")]
    pub bit_start: u32,
    pub length: u32,
    pub little_endian: bool,
    pub signed: bool,
    #[serde(default = "default_factor", alias = "scale")]
    pub factor: f64,
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, alias = "is_multiplexor")]
    pub multiplexor: bool,
    #[serde(default, alias = "multiplexor_id")]
    pub multiplexing: Option<u32>,
    /// Enumerated value labels, keyed by string encoded integer codes.
    #[serde(default)]
    pub enums: HashMap<String, String>,
    #[serde(default)]
    pub receivers: Vec<String>,
    /// Present in newer schema revisions; the numeric decode is governed
    /// by `signed` and `little_endian`, so this is accepted and ignored.
    #[serde(default)]
    pub value_type: Option<String>,
}

fn default_factor() -> f64 {
    1.0
}
