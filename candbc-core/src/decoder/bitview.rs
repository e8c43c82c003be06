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

/// The two bit-string views of a frame payload, built once per decode
/// and shared read-only across all signal extractions.
///
/// Both views hold one entry per bit, value 0 or 1, length
/// `8 * byte_count`.
/// * MSB view: payload bytes in given order, each expanded most
///   significant bit first. The literal big-endian bit image.
/// * LSB view: the MSB view with its *bytes* reversed. Only the byte
///   order is swapped, each byte keeps its internal bit order. A full
///   bit reversal here would silently mis-decode every Intel signal.
pub(crate) struct FrameBits {
    msb: Vec<u8>,
    lsb: Vec<u8>,
}

impl FrameBits {
    pub(crate) fn new(payload: &[u8]) -> Self {
        Self {
            msb: expand_bits(payload.iter()),
            lsb: expand_bits(payload.iter().rev()),
        }
    }

    /// View length in bits, identical for both views.
    pub(crate) fn len(&self) -> usize {
        self.msb.len()
    }

    pub(crate) fn view(&self, little_endian: bool) -> &[u8] {
        if little_endian { &self.lsb } else { &self.msb }
    }
}

fn expand_bits<'a>(bytes: impl Iterator<Item = &'a u8>) -> Vec<u8> {
    bytes
        .flat_map(|byte| (0..8).rev().map(move |i| (byte >> i) & 1))
        .collect()
}

/// Interpret a bit slice as an unsigned big-endian binary integer.
/// Caller guarantees at most 64 bits, the views are never longer.
pub(crate) fn raw_from_bits(bits: &[u8]) -> u64 {
    bits.iter()
        .fold(0u64, |acc, bit| (acc << 1) | u64::from(*bit))
}

/// Two's-complement interpretation of `raw` over `length` bits.
pub(crate) fn sign_extend(raw: u64, length: u32) -> i64 {
    if length >= 64 {
        return raw as i64;
    }
    let shift = 64 - length;
    ((raw << shift) as i64) >> shift
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_view_is_big_endian_bit_image() {
        let bits = FrameBits::new(&[0b_1100_0011, 0b_0000_0001]);
        assert_eq!(bits.len(), 16);
        assert_eq!(
            bits.view(false),
            &[1, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn test_lsb_view_swaps_bytes_not_bits() {
        let bits = FrameBits::new(&[0b_1100_0011, 0b_0000_0001]);
        // byte order reversed, each byte still expanded MSB first
        assert_eq!(
            bits.view(true),
            &[0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 1, 1]
        );
    }

    #[test]
    fn test_raw_from_bits() {
        assert_eq!(raw_from_bits(&[1, 1, 1, 1, 1, 1, 1, 1]), 255);
        assert_eq!(raw_from_bits(&[1, 0, 0]), 4);
        assert_eq!(raw_from_bits(&[0, 0, 0, 1]), 1);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0b_1111, 4), -1);
        assert_eq!(sign_extend(0b_0111, 4), 7);
        assert_eq!(sign_extend(0b_1000, 4), -8);
        assert_eq!(sign_extend(0xFF, 8), -1);
        assert_eq!(sign_extend(u64::MAX, 64), -1);
    }
}
