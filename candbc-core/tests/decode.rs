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

//! End-to-end decode tests against a realistic schema document.

use candbc_core::decode_frame;
use candbc_database::Database;
use candbc_interfaces::util::decode_hex_payload;

fn vehicle_database() -> Database {
    Database::from_json(
        r#"{
            "filename": "vehicle.dbc",
            "version": "2.3",
            "messages": {
                "0x100": {
                    "name": "Powertrain",
                    "sender": "VCU",
                    "length": 8,
                    "signals": {
                        "VehicleSpeed": {
                            "bit_start": 7, "length": 16,
                            "little_endian": false, "signed": false,
                            "factor": 0.01, "offset": 0, "unit": "km/h"
                        },
                        "MotorTorque": {
                            "bit_start": 16, "length": 16,
                            "little_endian": true, "signed": true,
                            "factor": 0.1, "offset": 0, "unit": "Nm"
                        },
                        "DriveMode": {
                            "bit_start": 63, "length": 3,
                            "little_endian": false, "signed": false,
                            "enums": {"0": "Eco", "1": "Sport", "2": "Snow"}
                        }
                    }
                }
            }
        }"#,
    )
    .unwrap()
}

#[test]
fn decode_mixed_endianness_frame() {
    let db = vehicle_database();

    // VehicleSpeed: 0x1234 = 4660 raw -> 46.60 km/h
    // MotorTorque: Intel field over payload bytes 2..4, 0xFF 0x7F -> 0x7FFF
    // DriveMode: top 3 bits of the last byte, 0b001 -> Sport
    let payload = decode_hex_payload("0x1234FF7F00000020").unwrap();
    let frame = decode_frame(&db, 0x100, &payload).unwrap();

    assert_eq!(frame.message_name, "Powertrain");
    assert_eq!(frame.frame_id, 0x100);
    assert_eq!(frame.signals.len(), 3);

    let speed = &frame.signals[0];
    assert_eq!(speed.name, "VehicleSpeed");
    assert_eq!(speed.raw, 0x1234);
    assert!((speed.value - 46.60).abs() < 1e-9);

    let torque = &frame.signals[1];
    assert_eq!(torque.name, "MotorTorque");
    assert_eq!(torque.raw, 0x7FFF);
    assert!((torque.value - 3276.7).abs() < 1e-9);

    let mode = &frame.signals[2];
    assert_eq!(mode.name, "DriveMode");
    assert_eq!(mode.raw, 1);
    assert_eq!(mode.label.as_deref(), Some("Sport"));
}

#[test]
fn decode_negative_torque() {
    let db = vehicle_database();

    // Intel 16 bit field at bit 16: bytes 2..4 low byte first.
    // 0x9C 0xFF -> 0xFF9C -> -100 -> -10.0 Nm
    let payload = decode_hex_payload("0x00009CFF00000000").unwrap();
    let frame = decode_frame(&db, 0x100, &payload).unwrap();

    let torque = &frame.signals[1];
    assert_eq!(torque.raw, 0xFF9C);
    assert!((torque.value - (-10.0)).abs() < 1e-9);
}

#[test]
fn decoded_frame_serializes_with_endianness_labels() {
    let db = vehicle_database();
    let payload = decode_hex_payload("0x1234FF7F00000020").unwrap();
    let frame = decode_frame(&db, 0x100, &payload).unwrap();

    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["message_name"], "Powertrain");
    assert_eq!(json["signals"][0]["endianness"], "MSB");
    assert_eq!(json["signals"][1]["endianness"], "LSB");
    // label is omitted when the schema has no enum entry for the value
    assert!(json["signals"][0].get("label").is_none());
    assert_eq!(json["signals"][2]["label"], "Sport");
}

#[test]
fn repeated_decodes_are_identical() {
    let db = vehicle_database();
    let payload = decode_hex_payload("0x1234FF7F00000020").unwrap();

    let first = serde_json::to_string(&decode_frame(&db, 0x100, &payload).unwrap()).unwrap();
    let second = serde_json::to_string(&decode_frame(&db, 0x100, &payload).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn shared_database_decodes_from_multiple_threads() {
    let db = std::sync::Arc::new(vehicle_database());
    let payload = decode_hex_payload("0x1234FF7F00000020").unwrap();

    let handles = (0..4)
        .map(|_| {
            let db = std::sync::Arc::clone(&db);
            let payload = payload.clone();
            std::thread::spawn(move || decode_frame(&db, 0x100, &payload).unwrap())
        })
        .collect::<Vec<_>>();

    let mut frames = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect::<Vec<_>>();
    let reference = frames.pop().unwrap();
    assert!(frames.iter().all(|f| *f == reference));
}
