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

use candbc_interfaces::{CanId, DecodeError, MAX_PAYLOAD_BYTES, util::parse_can_id};
use hashbrown::HashMap;

use crate::schema::{DatabaseSchema, MessageSchema, SignalSchema};

/// One bit field inside a [`Message`].
///
/// `bit_start` uses the DBC numbering convention of the signal's byte
/// order, not an index into the payload bit string. The extraction
/// engine remaps it per endianness.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub name: String,
    pub bit_start: u32,
    pub length: u32,
    pub little_endian: bool,
    pub signed: bool,
    pub factor: f64,
    pub offset: f64,
    pub min: f64,
    pub max: f64,
    pub unit: String,
    pub is_multiplexor: bool,
    pub multiplexor_id: Option<u32>,
    pub enum_values: HashMap<u64, String>,
    pub receivers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: CanId,
    pub name: String,
    pub sender: String,
    /// Declared payload length in bytes, 0..=8.
    pub length: usize,
    /// Sorted ascending by raw `bit_start`. Fixes decode and render order.
    pub signals: Vec<Signal>,
    /// Passthrough attributes, display only.
    pub attributes: HashMap<String, String>,
}

impl Message {
    /// The designated multiplexor signal, if the message has one.
    /// At most one exists, enforced at load time.
    #[must_use]
    pub fn multiplexor(&self) -> Option<&Signal> {
        self.signals.iter().find(|s| s.is_multiplexor)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Database {
    /// Schema version string, provenance only.
    pub version: String,
    pub filename: Option<String>,
    pub messages: HashMap<CanId, Message>,
}

impl Database {
    /// Parse a JSON schema document into the validated model.
    /// # Errors
    /// Returns `DecodeError::InvalidDatabase` when the document does not
    /// parse, the top-level `messages` key is absent, a message lacks
    /// `name`/`sender`, or a signal lacks
    /// `bit_start`/`length`/`little_endian`/`signed`.
    pub fn from_json(contents: &str) -> Result<Self, DecodeError> {
        let schema: DatabaseSchema = serde_json::from_str(contents)
            .map_err(|e| DecodeError::InvalidDatabase(format!("Schema does not parse: {e}")))?;
        Self::from_schema(schema)
    }

    pub(crate) fn from_schema(schema: DatabaseSchema) -> Result<Self, DecodeError> {
        let mut messages = HashMap::with_capacity(schema.messages.len());
        for (key, message) in schema.messages {
            let id = parse_can_id(&key).map_err(|_| {
                DecodeError::InvalidDatabase(format!("Message key '{key}' is not a CAN ID"))
            })?;
            messages.insert(id, build_message(id, message)?);
        }

        Ok(Database {
            version: schema.version,
            filename: schema.filename,
            messages,
        })
    }

    /// Look up the message declared for `id`.
    /// # Errors
    /// Returns `DecodeError::UnknownMessage` if `id` has no entry.
    pub fn lookup_message(&self, id: CanId) -> Result<&Message, DecodeError> {
        self.messages.get(&id).ok_or(DecodeError::UnknownMessage(id))
    }

    /// All distinct sending nodes, sorted for deterministic output.
    #[must_use]
    pub fn nodes(&self) -> Vec<&str> {
        let mut nodes = self
            .messages
            .values()
            .map(|m| m.sender.as_str())
            .collect::<Vec<_>>();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }

    /// Message IDs in ascending order, for deterministic rendering.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<CanId> {
        let mut ids = self.messages.keys().copied().collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }
}

fn build_message(id: CanId, message: MessageSchema) -> Result<Message, DecodeError> {
    if message.name.trim().is_empty() {
        return Err(DecodeError::InvalidDatabase(format!(
            "Message {id} has an empty name"
        )));
    }
    if message.sender.trim().is_empty() {
        return Err(DecodeError::InvalidDatabase(format!(
            "Message {id} has an empty sender"
        )));
    }
    if message.length > MAX_PAYLOAD_BYTES {
        return Err(DecodeError::InvalidDatabase(format!(
            "Message {id} declares {} bytes, the CAN payload ceiling is {MAX_PAYLOAD_BYTES}",
            message.length
        )));
    }

    let mut signals = message
        .signals
        .into_iter()
        .map(|(name, signal)| build_signal(id, name, signal))
        .collect::<Result<Vec<_>, DecodeError>>()?;
    // Stable order: ascending raw bit_start, name as tiebreaker so equal
    // starts do not depend on map iteration order.
    signals.sort_by(|a, b| {
        a.bit_start
            .cmp(&b.bit_start)
            .then_with(|| a.name.cmp(&b.name))
    });

    if signals.iter().filter(|s| s.is_multiplexor).count() > 1 {
        return Err(DecodeError::InvalidDatabase(format!(
            "Message {id} declares more than one multiplexor signal"
        )));
    }

    Ok(Message {
        id,
        name: message.name,
        sender: message.sender,
        length: message.length,
        signals,
        attributes: message.attributes,
    })
}

fn build_signal(id: CanId, name: String, signal: SignalSchema) -> Result<Signal, DecodeError> {
    if signal.length == 0 {
        return Err(DecodeError::InvalidDatabase(format!(
            "Signal '{name}' in message {id} has length 0"
        )));
    }
    if signal.multiplexor && signal.multiplexing.is_some() {
        return Err(DecodeError::InvalidDatabase(format!(
            "Signal '{name}' in message {id} is both multiplexor and multiplexed"
        )));
    }

    let enum_values = signal
        .enums
        .into_iter()
        .map(|(code, label)| {
            code.trim()
                .parse::<u64>()
                .map(|code| (code, label))
                .map_err(|e| {
                    DecodeError::InvalidDatabase(format!(
                        "Signal '{name}' in message {id} has non-integer enum code \
                         '{code}', error={e}"
                    ))
                })
        })
        .collect::<Result<HashMap<_, _>, DecodeError>>()?;

    Ok(Signal {
        name,
        bit_start: signal.bit_start,
        length: signal.length,
        little_endian: signal.little_endian,
        signed: signal.signed,
        factor: signal.factor,
        offset: signal.offset,
        min: signal.min,
        max: signal.max,
        unit: signal.unit,
        is_multiplexor: signal.multiplexor,
        multiplexor_id: signal.multiplexing,
        enum_values,
        receivers: signal.receivers,
    })
}
