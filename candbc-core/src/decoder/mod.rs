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

use candbc_interfaces::{CanId, DecodeError, MAX_PAYLOAD_BYTES, util::print_hex};
use candbc_database::{Database, Signal};
use serde::Serialize;

use crate::LOG_TARGET;

mod bitview;

use bitview::{FrameBits, raw_from_bits, sign_extend};

/// Which DBC bit numbering convention a signal was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Endianness {
    #[serde(rename = "LSB")]
    Lsb,
    #[serde(rename = "MSB")]
    Msb,
}

impl std::fmt::Display for Endianness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endianness::Lsb => write!(f, "LSB"),
            Endianness::Msb => write!(f, "MSB"),
        }
    }
}

/// One decoded signal. Created fresh per decode call, never persisted.
///
/// `bit_start`/`bit_end` are the resolved positions in the selected bit
/// view, not the raw DBC `bit_start` of the schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedSignal {
    pub name: String,
    pub bit_start: usize,
    pub bit_end: usize,
    pub length: u32,
    pub factor: f64,
    pub offset: f64,
    pub endianness: Endianness,
    /// The unsigned raw bit field, before sign interpretation and scaling.
    pub raw: u64,
    /// Physical value: `raw * factor + offset`, with `raw` read as
    /// two's-complement over `length` bits for signed signals.
    pub value: f64,
    pub unit: String,
    /// Enum label for `raw`, when the schema defines one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedFrame {
    pub message_name: String,
    pub frame_id: CanId,
    /// In ascending order of the signals' raw `bit_start`.
    pub signals: Vec<DecodedSignal>,
}

/// Decode a CAN frame against the database.
///
/// Two-phase evaluation: the multiplexor signal (if any) is decoded
/// first to fix the active mode, then all eligible signals are decoded
/// in ascending `bit_start` order. The first failing signal fails the
/// whole call; a partial frame is never returned.
///
/// # Errors
/// * `DecodeError::PayloadFormat` - payload is empty or over 8 bytes.
/// * `DecodeError::UnknownMessage` - no message declared for `frame_id`.
/// * `DecodeError::BitRange` - a signal does not fit the payload.
/// * `DecodeError::MultiplexorResolution` - the multiplexor signal
///   itself failed to decode.
pub fn decode_frame(
    db: &Database,
    frame_id: CanId,
    payload: &[u8],
) -> Result<DecodedFrame, DecodeError> {
    if payload.is_empty() || payload.len() > MAX_PAYLOAD_BYTES {
        return Err(DecodeError::PayloadFormat(format!(
            "Payload must be 1..={MAX_PAYLOAD_BYTES} bytes, got {}",
            payload.len()
        )));
    }

    let message = db.lookup_message(frame_id)?;
    let bits = FrameBits::new(payload);

    tracing::debug!(
        target: LOG_TARGET,
        frame_id,
        message = %message.name,
        payload = %print_hex(payload, MAX_PAYLOAD_BYTES),
        "Decoding frame"
    );

    let active_mode = resolve_multiplexor(message.multiplexor(), &bits)?;

    let mut signals = Vec::with_capacity(message.signals.len());
    for signal in &message.signals {
        let eligible = match signal.multiplexor_id {
            None => true,
            Some(id) => active_mode == Some(u64::from(id)),
        };
        if !eligible {
            continue;
        }
        signals.push(decode_signal(signal, &bits)?);
    }

    Ok(DecodedFrame {
        message_name: message.name.clone(),
        frame_id,
        signals,
    })
}

/// Phase 1: decode exactly the multiplexor signal and fix the active
/// mode. Kept separate from the signal loop so the mode -> dependent
/// direction stays unambiguous.
fn resolve_multiplexor(
    multiplexor: Option<&Signal>,
    bits: &FrameBits,
) -> Result<Option<u64>, DecodeError> {
    multiplexor
        .map(|signal| {
            decode_signal(signal, bits)
                .map(|decoded| decoded.raw)
                .map_err(|e| {
                    DecodeError::MultiplexorResolution(format!(
                        "multiplexor signal '{}' did not decode: {e}",
                        signal.name
                    ))
                })
        })
        .transpose()
}

fn decode_signal(signal: &Signal, bits: &FrameBits) -> Result<DecodedSignal, DecodeError> {
    let (start, end) = resolve_bit_range(signal, bits.len())?;
    let view = bits.view(signal.little_endian);
    let raw = raw_from_bits(&view[start..end]);

    let scaled = if signal.signed {
        sign_extend(raw, signal.length) as f64
    } else {
        raw as f64
    };

    Ok(DecodedSignal {
        name: signal.name.clone(),
        bit_start: start,
        bit_end: end,
        length: signal.length,
        factor: signal.factor,
        offset: signal.offset,
        endianness: if signal.little_endian {
            Endianness::Lsb
        } else {
            Endianness::Msb
        },
        raw,
        value: scaled * signal.factor + signal.offset,
        unit: signal.unit.clone(),
        label: signal.enum_values.get(&raw).cloned(),
    })
}

/// Map the DBC `bit_start` onto a `[start, end)` slice of the selected
/// bit view.
///
/// Motorola: `bit_start` names the most significant bit, counted with a
/// byte-local reversal, so the position in the big-endian bit image is
/// `(bit_start / 8) * 8 + (7 - bit_start % 8)` and the field extends
/// towards higher positions.
///
/// Intel: `bit_start` names the least significant bit counted from the
/// start of the payload in little-endian order, so in the byte-swapped
/// view the field *ends* at `view_bits - bit_start` and starts `length`
/// bits earlier.
fn resolve_bit_range(signal: &Signal, view_bits: usize) -> Result<(usize, usize), DecodeError> {
    let out_of_range = || DecodeError::BitRange {
        signal: signal.name.clone(),
        bit_start: signal.bit_start,
        length: signal.length,
        view_bits,
    };

    let bit_start = signal.bit_start as usize;
    let length = signal.length as usize;
    if bit_start >= view_bits {
        return Err(out_of_range());
    }

    let (start, end) = if signal.little_endian {
        let end = view_bits - bit_start;
        let start = end.checked_sub(length).ok_or_else(out_of_range)?;
        (start, end)
    } else {
        let start = (bit_start / 8) * 8 + (7 - bit_start % 8);
        (start, start + length)
    };

    if start >= end || end > view_bits {
        return Err(out_of_range());
    }
    Ok((start, end))
}
