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

//! DBC text emission.
//!
//! Serializes a loaded [`Database`] back into the textual DBC syntax.
//! Purely mechanical text generation over the schema model; no part of
//! the decode path depends on this module.

use std::fmt::Write as _;

use crate::datatypes::{Database, Message, Signal};

/// The symbol table every DBC file carries verbatim.
const NEW_SYMBOLS: &str = "NS_ :
    BA_
    BA_DEF_
    BA_DEF_DEF_
    BA_DEF_DEF_REL_
    BA_DEF_REL_
    BA_DEF_SGTYPE_
    BA_REL_
    BA_SGTYPE_
    BO_TX_BU_
    BU_BO_REL_
    BU_EV_REL_
    BU_SG_REL_
    CAT_
    CAT_DEF_
    CM_
    ENVVAR_DATA_
    EV_DATA_
    FILTER
    NS_DESC_
    SGTYPE_
    SGTYPE_VAL_
    SG_MUL_VAL_
    SIGTYPE_VALTYPE_
    SIG_GROUP_
    SIG_TYPE_REF_
    SIG_VALTYPE_
    VAL_
    VAL_TABLE_
";

const ATTRIBUTE_DEFINITIONS: &str = r##"BA_DEF_ BO_ "isj1939dbc" INT 0 0;
BA_DEF_ BO_ "GenMsgBackgroundColor" STRING ;
BA_DEF_ BO_ "GenMsgForegroundColor" STRING ;
BA_DEF_DEF_ "isj1939dbc" 0;
BA_DEF_DEF_ "GenMsgBackgroundColor" "#ffffff";
BA_DEF_DEF_ "GenMsgForegroundColor" "#000000";
"##;

/// Render the whole database as DBC text.
#[must_use]
pub fn render(db: &Database) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "VERSION \"{}\"", db.version);
    out.push('\n');
    out.push_str(NEW_SYMBOLS);
    out.push('\n');
    out.push_str("BS_:\n");
    let _ = writeln!(out, "BU_: {}", db.nodes().join(" "));

    for id in db.sorted_ids() {
        if let Ok(message) = db.lookup_message(id) {
            out.push_str(&render_message(message));
        }
    }

    out.push('\n');
    out.push_str(ATTRIBUTE_DEFINITIONS);
    out.push('\n');

    for id in db.sorted_ids() {
        if let Ok(message) = db.lookup_message(id) {
            for signal in &message.signals {
                if !signal.enum_values.is_empty() {
                    out.push_str(&render_value_definition(message.id, signal));
                }
            }
        }
    }

    out
}

fn render_message(message: &Message) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "BO_ {} {}: {} {}",
        message.id, message.name, message.length, message.sender
    );
    for signal in &message.signals {
        let _ = writeln!(out, "{}", render_signal(signal));
    }
    out
}

fn render_signal(signal: &Signal) -> String {
    let multiplexor_info = if signal.is_multiplexor {
        " M".to_owned()
    } else if let Some(id) = signal.multiplexor_id {
        format!(" m{id}")
    } else {
        String::new()
    };
    let receivers = if signal.receivers.is_empty() {
        "Vector__XXX".to_owned()
    } else {
        signal.receivers.join(",")
    };

    format!(
        " SG_ {name}{multiplexor_info} : {bit_start}|{length}@{endian}{sign} \
         ({factor},{offset}) [{min}|{max}] \"{unit}\" {receivers}",
        name = signal.name,
        bit_start = signal.bit_start,
        length = signal.length,
        endian = u8::from(signal.little_endian),
        sign = if signal.signed { '-' } else { '+' },
        factor = signal.factor,
        offset = signal.offset,
        min = signal.min,
        max = signal.max,
        unit = signal.unit,
    )
}

fn render_value_definition(id: candbc_interfaces::CanId, signal: &Signal) -> String {
    let mut codes = signal.enum_values.iter().collect::<Vec<_>>();
    codes.sort_by_key(|(code, _)| **code);
    let table = codes
        .iter()
        .map(|(code, label)| format!("{code} \"{label}\""))
        .collect::<Vec<_>>()
        .join(" ");
    format!("VAL_ {id} {} {table};\n", signal.name)
}
