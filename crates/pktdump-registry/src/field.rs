// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FieldDescriptor
// ---------------------------------------------------------------------------

/// A single observed field of an undecoded packet.
///
/// Built on demand from the raw parameters of a message whose opcode has no
/// typed decoder yet.  Immutable once created; persisted only as part of its
/// owning record, never on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field ordinal within the message, as seen on the wire.
    pub position: u8,
    /// Primitive type label reported by the decoder.  Treated as an opaque
    /// string; never validated here.
    pub type_name: String,
}

impl FieldDescriptor {
    /// Create a descriptor for the field at `position` with the given
    /// primitive type label.
    pub fn new(position: u8, type_name: impl Into<String>) -> Self {
        FieldDescriptor {
            position,
            type_name: type_name.into(),
        }
    }

    /// Render the one-line textual declaration for this field.
    ///
    /// The wire position shows up twice: once as the placeholder field name
    /// (`Unknown<position>`) and once inside the backtick tag, so tooling
    /// reading the dump can bind the declaration back to its wire position.
    ///
    /// Duplicate positions within one message are the caller's problem; this
    /// is a pure transformation with no side effects.
    pub fn declaration(&self) -> String {
        format!(
            "Unknown{} {}\t`wire:\"{}\"`",
            self.position, self.type_name, self.position
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_embeds_position_twice() {
        let field = FieldDescriptor::new(1, "int");
        assert_eq!(field.declaration(), "Unknown1 int\t`wire:\"1\"`");
    }

    #[test]
    fn declaration_keeps_type_name_opaque() {
        let field = FieldDescriptor::new(42, "[]uint8");
        assert_eq!(field.declaration(), "Unknown42 []uint8\t`wire:\"42\"`");
    }
}
