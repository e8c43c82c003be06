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

//! Presentation over the engine output. No decode logic lives here.

use std::fmt::Write as _;

use candbc_core::DecodedFrame;
use candbc_database::{Database, Signal};

/// Plain text rendering of a decoded frame, one signal per line.
#[must_use]
pub fn frame_text(frame: &DecodedFrame, resolve_labels: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Message {} ({:#x})",
        frame.message_name, frame.frame_id
    );
    for signal in &frame.signals {
        let unit = match (&signal.label, resolve_labels) {
            (Some(label), true) => label.as_str(),
            _ => signal.unit.as_str(),
        };
        let _ = writeln!(
            out,
            "Signal {name} - ({length}@{bit_start} {endianness})x{factor}+{offset} \
             = {value} {unit}",
            name = signal.name,
            length = signal.length,
            bit_start = signal.bit_start,
            endianness = signal.endianness,
            factor = signal.factor,
            offset = signal.offset,
            value = signal.value,
        );
    }
    out
}

/// JSON rendering of a decoded frame.
/// # Errors
/// Returns the underlying serializer error, which for this structure
/// only occurs on a failing writer.
pub fn frame_json(frame: &DecodedFrame) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(frame)
}

/// HTML report of the whole database: one section per message with a
/// signal table, bootstrap styling.
#[must_use]
pub fn database_html(db: &Database) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html>\n");
    out.push_str(
        "<meta><link rel='stylesheet' \
         href='https://maxcdn.bootstrapcdn.com/bootstrap/3.3.5/css/bootstrap.min.css'>\n",
    );
    out.push_str("<body>\n<div class='container'>\n<div class='jumbotron'>\n");
    let _ = writeln!(
        out,
        "<h2>{}</h2>",
        db.filename.as_deref().unwrap_or("CAN database")
    );
    let _ = writeln!(
        out,
        "<p class='lead'>{}</p>",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    out.push_str("</div>\n<div class='row'>\n");

    for id in db.sorted_ids() {
        let Ok(message) = db.lookup_message(id) else {
            continue;
        };
        let _ = writeln!(out, "<h3>{} ({id:#x})</h3>", message.name);
        let _ = writeln!(
            out,
            "<p>Length: {} - Transmitter: {} - Decimal: {id}</p>",
            message.length, message.sender
        );

        // passthrough attributes, sorted for stable output
        let mut attributes = message.attributes.iter().collect::<Vec<_>>();
        attributes.sort();
        for (name, value) in attributes {
            let _ = writeln!(out, "<p>{name}: {value}</p>");
        }

        out.push_str(&signal_table(&message.signals));
    }

    out.push_str("</div>\n</div>\n</body>\n</html>\n");
    out
}

fn signal_table(signals: &[Signal]) -> String {
    let mut out = String::new();
    out.push_str("<table class='table table-border table-hover'>\n<tr>\n");
    for header in [
        "Signal name",
        "Start bit",
        "Length",
        "Endianness",
        "Factor",
        "Offset",
        "Range",
        "Enums",
    ] {
        let _ = writeln!(out, "<th>{header}</th>");
    }
    out.push_str("</tr>\n");

    for signal in signals {
        let mut enums = signal.enum_values.iter().collect::<Vec<_>>();
        enums.sort_by_key(|(code, _)| **code);
        let enums = enums
            .iter()
            .map(|(code, label)| format!("{code}: {label}"))
            .collect::<Vec<_>>()
            .join("<br>");

        out.push_str("<tr>\n");
        let _ = writeln!(
            out,
            "<td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{} to {}</td><td>{enums}</td>",
            signal.name,
            signal.bit_start,
            signal.length,
            if signal.little_endian { "LSB" } else { "MSB" },
            signal.factor,
            signal.offset,
            signal.min,
            signal.max,
        );
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

#[cfg(test)]
mod tests {
    use candbc_core::decode_frame;
    use candbc_database::Database;

    fn sample_database() -> Database {
        Database::from_json(
            r#"{
                "filename": "test.dbc",
                "messages": {
                    "100": {
                        "name": "Motion",
                        "sender": "VCU",
                        "length": 2,
                        "attributes": {"GenMsgSendType": "cyclic"},
                        "signals": {
                            "Speed": {
                                "bit_start": 7, "length": 8,
                                "little_endian": false, "signed": false,
                                "factor": 0.5, "offset": 0,
                                "min": 0, "max": 127, "unit": "km/h"
                            },
                            "Gear": {
                                "bit_start": 15, "length": 8,
                                "little_endian": false, "signed": false,
                                "enums": {"0": "Park", "1": "Drive"}
                            }
                        }
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_frame_text_format() {
        let db = sample_database();
        let frame = decode_frame(&db, 100, &[0x50, 0x01]).unwrap();
        let text = super::frame_text(&frame, true);

        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Message Motion (0x64)");
        assert_eq!(lines[1], "Signal Speed - (8@0 MSB)x0.5+0 = 40 km/h");
        // enum label preferred over the (empty) unit
        assert_eq!(lines[2], "Signal Gear - (8@8 MSB)x1+0 = 1 Drive");
    }

    #[test]
    fn test_frame_text_without_label_resolution() {
        let db = sample_database();
        let frame = decode_frame(&db, 100, &[0x50, 0x01]).unwrap();
        let text = super::frame_text(&frame, false);
        assert!(text.contains("Signal Gear - (8@8 MSB)x1+0 = 1 \n"));
    }

    #[test]
    fn test_frame_json_round_trips() {
        let db = sample_database();
        let frame = decode_frame(&db, 100, &[0x50, 0x01]).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&super::frame_json(&frame).unwrap()).unwrap();
        assert_eq!(json["frame_id"], 100);
        assert_eq!(json["signals"][0]["value"], 40.0);
    }

    #[test]
    fn test_database_html_report() {
        let html = super::database_html(&sample_database());

        assert!(html.contains("<h2>test.dbc</h2>"));
        assert!(html.contains("<h3>Motion (0x64)</h3>"));
        assert!(html.contains("<p>Length: 2 - Transmitter: VCU - Decimal: 100</p>"));
        assert!(html.contains("<p>GenMsgSendType: cyclic</p>"));
        assert!(html.contains("<th>Start bit</th>"));
        // raw DBC bit_start in the schema report, not the resolved one
        assert!(html.contains("<td>Speed</td><td>7</td><td>8</td><td>MSB</td>"));
        assert!(html.contains("0: Park<br>1: Drive"));
    }
}
