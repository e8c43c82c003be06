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

use std::fmt::{Display, Formatter};

pub mod util;

/// Numeric CAN frame identifier. 32 bits to cover 29-bit extended IDs.
pub type CanId = u32;

/// Hard upper bound of a classic CAN payload in bytes.
pub const MAX_PAYLOAD_BYTES: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The schema document is malformed or incomplete. Fatal, nothing
    /// can be decoded against it.
    InvalidDatabase(String),
    /// The frame ID has no entry in the database. Fatal for that frame only.
    UnknownMessage(CanId),
    /// The payload is not valid hex, has an odd digit count or exceeds
    /// 8 bytes. Raised before the engine is invoked.
    PayloadFormat(String),
    /// A frame ID or other request input could not be parsed.
    InvalidRequest(String),
    /// A signal's resolved bit range does not fit the payload. Never
    /// clamped or zero-filled.
    BitRange {
        signal: String,
        bit_start: u32,
        length: u32,
        view_bits: usize,
    },
    /// The multiplexor signal itself failed to decode, leaving the
    /// active mode undefined. No dependent signal is decoded.
    MultiplexorResolution(String),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::InvalidDatabase(msg) => write!(f, "Invalid database: {msg}"),
            DecodeError::UnknownMessage(id) => {
                write!(f, "Unknown message: no entry for CAN ID {id}")
            }
            DecodeError::PayloadFormat(msg) => write!(f, "Bad payload: {msg}"),
            DecodeError::InvalidRequest(msg) => write!(f, "Invalid request: {msg}"),
            DecodeError::BitRange {
                signal,
                bit_start,
                length,
                view_bits,
            } => write!(
                f,
                "Bit range out of bounds: signal '{signal}' \
                 (bit_start={bit_start}, length={length}) does not fit a \
                 {view_bits} bit payload"
            ),
            DecodeError::MultiplexorResolution(msg) => {
                write!(f, "Multiplexor resolution failed: {msg}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}
