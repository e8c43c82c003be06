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

use std::path::PathBuf;

use candbc_interfaces::{DecodeError, util};
use candbc_main::{config, render};
use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::AppError::{ConfigurationError, DataError, InputError, NotFound, RuntimeError};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct AppArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a single CAN frame against the database.
    Decode {
        /// CAN frame ID, decimal or 0x-prefixed hex.
        id: String,
        /// Frame payload as a 0x-prefixed hex string, 1 to 8 bytes.
        data: String,
        /// Schema file, defaults to the configured database path.
        dbcfile: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Emit the database in DBC text form.
    Dbc {
        dbcfile: Option<PathBuf>,
    },
    /// Emit an HTML report of the database.
    Html {
        dbcfile: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error `{0}`")]
    ConfigurationError(String),
    #[error("Data error `{0}`")]
    DataError(String),
    #[error("Input error `{0}`")]
    InputError(String),
    #[error("Not found: `{0}`")]
    NotFound(String),
    #[error("Error during execution `{0}`")]
    RuntimeError(String),
}

impl From<DecodeError> for AppError {
    fn from(value: DecodeError) -> Self {
        match value {
            DecodeError::InvalidDatabase(_) => DataError(value.to_string()),

            DecodeError::UnknownMessage(_) => NotFound(value.to_string()),

            DecodeError::PayloadFormat(_) | DecodeError::InvalidRequest(_) => {
                InputError(value.to_string())
            }

            DecodeError::BitRange { .. } | DecodeError::MultiplexorResolution(_) => {
                RuntimeError(value.to_string())
            }
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = AppArgs::parse();
    let config = config::load_config().unwrap_or_else(|e| {
        println!("Failed to load configuration: {e}");
        println!("Using default values");
        config::default_config()
    });

    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .map_err(|e| ConfigurationError(format!("Invalid log filter: {e}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Decode {
            id,
            data,
            dbcfile,
            format,
        } => {
            let db = load_database(dbcfile, &config)?;
            let frame_id = util::parse_can_id(&id)?;
            let payload = util::decode_hex_payload(&data)?;
            let frame = candbc_core::decode_frame(&db, frame_id, &payload)?;
            match format {
                OutputFormat::Text => {
                    print!("{}", render::frame_text(&frame, config.output.resolve_labels));
                }
                OutputFormat::Json => {
                    let json = render::frame_json(&frame)
                        .map_err(|e| RuntimeError(format!("Serialization failed: {e}")))?;
                    println!("{json}");
                }
            }
        }
        Command::Dbc { dbcfile } => {
            let db = load_database(dbcfile, &config)?;
            print!("{}", candbc_database::dbc::render(&db));
        }
        Command::Html { dbcfile } => {
            let db = load_database(dbcfile, &config)?;
            print!("{}", render::database_html(&db));
        }
    }

    Ok(())
}

fn load_database(
    dbcfile: Option<PathBuf>,
    config: &config::configfile::Configuration,
) -> Result<candbc_database::Database, AppError> {
    let path = dbcfile.unwrap_or_else(|| PathBuf::from(&config.database_path));
    tracing::debug!(path = %path.display(), "Loading database");
    Ok(candbc_database::load_database(path)?)
}
