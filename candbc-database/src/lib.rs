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

//! Schema model of a CAN message database.
//!
//! The database is loaded once from its JSON representation (the output
//! of an external DBC-to-JSON converter) and is immutable afterwards.
//! Decoding never mutates it, so a single instance can be shared across
//! threads.

use std::path::Path;

use candbc_interfaces::DecodeError;

pub mod datatypes;
pub mod dbc;
pub(crate) mod schema;

pub use datatypes::{Database, Message, Signal};

pub(crate) const LOG_TARGET: &str = "candbc-database";

/// Load a database from a JSON schema file.
/// # Errors
/// Returns `DecodeError::InvalidDatabase` if the file cannot be read or
/// does not parse into a valid schema.
pub fn load_database<P: AsRef<Path>>(path: P) -> Result<Database, DecodeError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        DecodeError::InvalidDatabase(format!(
            "Unable to read schema file '{}', error={e}",
            path.display()
        ))
    })?;
    let database = Database::from_json(&contents)?;
    tracing::debug!(
        target: LOG_TARGET,
        path = %path.display(),
        messages = database.messages.len(),
        "Loaded CAN database"
    );
    Ok(database)
}
