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
use crate::{CanId, DecodeError, MAX_PAYLOAD_BYTES};

/// Parse a CAN frame identifier given as a decimal integer string or a
/// `0x`-prefixed hexadecimal string.
/// # Errors
/// Returns `DecodeError::InvalidRequest` if the string is neither.
pub fn parse_can_id(value: &str) -> Result<CanId, DecodeError> {
    let value = value.trim();
    if let Some(hexdigits) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        CanId::from_str_radix(hexdigits, 16)
    } else {
        value.parse::<CanId>()
    }
    .map_err(|e| DecodeError::InvalidRequest(format!("Invalid CAN ID '{value}', error={e}")))
}

/// Decode a `0x`-prefixed hex payload string into bytes.
/// The digit count must be even and the result must fit a classic CAN
/// frame (1..=8 bytes).
/// # Errors
/// Returns `DecodeError::PayloadFormat` on a missing prefix, odd digit
/// count, non-hex content, an empty payload or one over 8 bytes.
pub fn decode_hex_payload(value: &str) -> Result<Vec<u8>, DecodeError> {
    let digits = value
        .trim()
        .strip_prefix("0x")
        .or_else(|| value.trim().strip_prefix("0X"))
        .ok_or_else(|| {
            DecodeError::PayloadFormat(format!("Payload '{value}' is missing the 0x prefix"))
        })?;

    if digits.is_empty() {
        return Err(DecodeError::PayloadFormat("Payload is empty".to_owned()));
    }
    if !digits.len().is_multiple_of(2) {
        return Err(DecodeError::PayloadFormat(format!(
            "Payload '{value}' has an odd number of hex digits"
        )));
    }
    if digits.len() > 2 * MAX_PAYLOAD_BYTES {
        return Err(DecodeError::PayloadFormat(format!(
            "Payload '{value}' exceeds {MAX_PAYLOAD_BYTES} bytes"
        )));
    }

    hex::decode(digits)
        .map_err(|e| DecodeError::PayloadFormat(format!("Invalid hex payload, error={e}")))
}

/// Render a byte slice as comma separated hex values, capped at `max_size`
/// bytes. Intended for log output.
#[must_use]
pub fn print_hex(data: &[u8], max_size: usize) -> String {
    let end = data.len().min(max_size);
    data.get(..end)
        .unwrap_or(data)
        .iter()
        .map(|b| format!("{b:#04X}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_can_id() {
        assert_eq!(parse_can_id("100").unwrap(), 100);
        assert_eq!(parse_can_id("0x64").unwrap(), 100);
        assert_eq!(parse_can_id("0X64").unwrap(), 100);
        assert!(parse_can_id("abc").is_err());
        assert!(parse_can_id("0x").is_err());
        assert!(parse_can_id("-1").is_err());
    }

    #[test]
    fn test_decode_hex_payload() {
        assert_eq!(decode_hex_payload("0x12").unwrap(), vec![0x12]);
        assert_eq!(
            decode_hex_payload("0xFF00000000000000").unwrap(),
            vec![0xFF, 0, 0, 0, 0, 0, 0, 0]
        );

        // missing prefix
        assert!(decode_hex_payload("12").is_err());
        // odd digit count
        assert!(decode_hex_payload("0x123").is_err());
        // more than 8 bytes
        assert!(decode_hex_payload("0x112233445566778899").is_err());
        // non-hex content
        assert!(decode_hex_payload("0x12GG").is_err());
        // empty
        assert!(decode_hex_payload("0x").is_err());
    }

    #[test]
    fn test_print_hex() {
        assert_eq!(print_hex(&[0xA3, 0x4F], 8), "0xA3,0x4F");
        assert_eq!(print_hex(&[0xA3, 0x4F, 0x9C], 2), "0xA3,0x4F");
    }
}
