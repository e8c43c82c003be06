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

//! Signal extraction engine.
//!
//! Locates each signal's bit field in a raw CAN payload, corrects for the
//! two DBC bit-numbering conventions (Motorola and Intel), resolves
//! multiplexed signal sets and applies the linear scale-and-offset
//! transform. Purely functional over immutable inputs: a decode call
//! performs no I/O, holds no state and can run concurrently against a
//! shared [`candbc_database::Database`].

pub mod decoder;

pub use decoder::{DecodedFrame, DecodedSignal, Endianness, decode_frame};

pub(crate) const LOG_TARGET: &str = "candbc-core";
