// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discovery registry for protocol packets without a typed decoder.
//!
//! When the protocol client receives a message whose opcode it cannot
//! decode, this crate records the message's observed field layout into a
//! durable, human-editable dump file.  A developer later promotes dump
//! entries into typed decoders by hand; the registry itself knows nothing
//! about any opcode's semantics.
//!
//! # Features
//!
//! - **Deduplication**: each opcode is recorded at most once per file
//! - **Append-only persistence**: existing dump content is never rewritten
//! - **Fail-soft I/O**: file errors degrade discovery to in-memory-only
//!   instead of crashing the host client
//!
//! # Architecture
//!
//! ```text
//! Protocol client (unknown opcode)
//!        |
//!        v
//!   DumpRegistry (in-memory index, dedup)
//!        |
//!        v
//!   DumpStore (append-only dump file)
//! ```
//!
//! Wire decoding, payload semantics, and result upload live elsewhere; the
//! registry only ever sees "opcode plus observed field list".

pub mod config;
pub mod field;
pub mod parser;
pub mod registry;
pub mod store;

pub use config::Config;
pub use field::FieldDescriptor;
pub use parser::{parse_dump, serialize_dump, DumpState, PacketRecord, ParseError};
pub use registry::{DumpRegistry, OpcodeNames, RegistryError, StaticOpcodeNames};
pub use store::{DumpStore, StoreError, FILE_HEADER};
