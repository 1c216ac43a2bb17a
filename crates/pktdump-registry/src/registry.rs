// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::collections::HashMap;
use std::fmt;

use crate::config::Config;
use crate::field::FieldDescriptor;
use crate::parser::{build_record_body, format_record, parse_dump, DumpState, PacketRecord};
use crate::store::{DumpStore, StoreError};

// ---------------------------------------------------------------------------
// OpcodeNames
// ---------------------------------------------------------------------------

/// Naming collaborator: maps an opcode to its human-readable message name.
///
/// New records are titled with this name.  A missing name for a freshly
/// discovered opcode is a caller contract violation and fails the add.
pub trait OpcodeNames {
    /// Message name for `opcode`, or `None` if the opcode is unmapped.
    fn name_for(&self, opcode: i16) -> Option<&str>;
}

/// Map-backed [`OpcodeNames`] implementation.
#[derive(Debug, Clone, Default)]
pub struct StaticOpcodeNames {
    names: HashMap<i16, String>,
}

impl StaticOpcodeNames {
    /// Create an empty name table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `opcode` to `name`, replacing any previous mapping.
    pub fn insert(&mut self, opcode: i16, name: impl Into<String>) {
        self.names.insert(opcode, name.into());
    }
}

impl OpcodeNames for StaticOpcodeNames {
    fn name_for(&self, opcode: i16) -> Option<&str> {
        self.names.get(&opcode).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(i16, S)> for StaticOpcodeNames {
    fn from_iter<T: IntoIterator<Item = (i16, S)>>(iter: T) -> Self {
        StaticOpcodeNames {
            names: iter.into_iter().map(|(op, name)| (op, name.into())).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Errors produced by the dump registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The naming collaborator has no name for a newly discovered opcode.
    UnknownOpcode(i16),
    /// The backing file rejected the append.
    Store(StoreError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownOpcode(opcode) => {
                write!(f, "no message name configured for opcode {}", opcode)
            }
            RegistryError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<StoreError> for RegistryError {
    fn from(e: StoreError) -> Self {
        RegistryError::Store(e)
    }
}

// ---------------------------------------------------------------------------
// DumpRegistry
// ---------------------------------------------------------------------------

/// In-memory index of discovered packets, backed by an append-only file.
///
/// Construct once at startup with [`load`](Self::load) and pass by reference
/// to whatever needs discovery; there is no ambient global instance.
///
/// Not internally synchronized: `add` is a check-then-append sequence, so a
/// registry shared across threads needs an external lock.  Discovery only
/// fires on unknown opcodes, so the blocking file I/O here stays off the hot
/// decode path.
pub struct DumpRegistry<N> {
    state: DumpState,
    store: DumpStore,
    names: N,
    enabled: bool,
    write_disabled: bool,
}

impl<N: OpcodeNames> DumpRegistry<N> {
    /// Load the registry state from the dump file named by `config`.
    ///
    /// This is the only point where the file is read.  Failures never crash
    /// the host: a file that cannot be created degrades the registry to
    /// in-memory-only operation, and a corrupt file is abandoned in favor of
    /// an empty state (never a partially populated one).  Both cases log a
    /// warning.
    pub fn load(config: &Config, names: N) -> Self {
        let mut registry = DumpRegistry {
            state: DumpState::default(),
            store: DumpStore::new(&config.dump_path),
            names,
            enabled: config.dump_unknown,
            write_disabled: false,
        };

        if !registry.enabled {
            return registry;
        }

        if let Err(e) = registry.store.ensure_exists() {
            log::warn!("{}; packet discovery is in-memory only for this run", e);
            registry.write_disabled = true;
            return registry;
        }

        let content = match registry.store.read() {
            Ok(content) => content,
            Err(e) => {
                log::warn!("{}; starting with an empty registry", e);
                return registry;
            }
        };

        match parse_dump(&content) {
            Ok(state) => {
                log::debug!(
                    "loaded {} discovered packet(s) from {}",
                    state.records.len(),
                    registry.store.path().display()
                );
                registry.state = state;
            }
            Err(e) => {
                log::warn!(
                    "corrupt dump file {}: {}; starting with an empty registry",
                    registry.store.path().display(),
                    e
                );
            }
        }

        registry
    }

    /// True iff a record for `opcode` is already registered.
    ///
    /// Single source of truth for deduplication.
    pub fn exists(&self, opcode: i16) -> bool {
        self.state.records.iter().any(|r| r.opcode == opcode)
    }

    /// Record a newly observed packet layout.
    ///
    /// Returns `Ok(false)` without touching anything when discovery is off
    /// or the opcode is already registered; re-observing a known opcode is
    /// expected and must stay cheap and silent.  Returns `Ok(true)` after
    /// registering and appending a new record.
    ///
    /// On an append failure the record is retained in memory (so dedup keeps
    /// working), further writes are disabled for this run, and the error is
    /// returned.
    pub fn add(
        &mut self,
        opcode: i16,
        fields: &[FieldDescriptor],
    ) -> Result<bool, RegistryError> {
        if !self.enabled {
            return Ok(false);
        }
        if self.exists(opcode) {
            return Ok(false);
        }

        let name = self
            .names
            .name_for(opcode)
            .ok_or(RegistryError::UnknownOpcode(opcode))?;
        let record = PacketRecord {
            opcode,
            body: build_record_body(name, fields),
        };
        let text = format_record(&record);
        self.state.records.push(record);

        if self.write_disabled {
            log::debug!("dump writes disabled; opcode {} kept in memory only", opcode);
            return Ok(true);
        }

        if let Err(e) = self.store.append(&text) {
            self.write_disabled = true;
            log::warn!("{}; the on-disk dump is now behind memory", e);
            return Err(e.into());
        }

        Ok(true)
    }

    /// The loaded state, for inspection by the decode pipeline.
    pub fn state(&self) -> &DumpState {
        &self.state
    }

    /// Number of registered records.
    pub fn record_count(&self) -> usize {
        self.state.records.len()
    }

    /// True iff discovery was enabled in the configuration.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
