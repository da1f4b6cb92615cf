//! IR Handles
//!
//! Defines handles and IDs used in the IR

use serde::{Deserialize, Serialize};

/// Branded type for a cross-reference ID. During ingest, `XrefId`s are generated to link together
/// different IR operations which need to reference each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct XrefId(pub usize);

impl XrefId {
    pub fn new(id: usize) -> Self {
        XrefId(id)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for XrefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Slot handle for operations that consume slots.
///
/// The slot stays `None` until slot allocation runs; every op and expression referring to the same
/// slot carries a copy of the handle reserved during ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SlotHandle {
    /// The slot number, or `None` if slots have not yet been assigned.
    pub slot: Option<usize>,
}

impl SlotHandle {
    /// Create a new SlotHandle with no slot assigned.
    pub fn new() -> Self {
        SlotHandle { slot: None }
    }

    /// Create a SlotHandle with a specific slot number.
    pub fn with_slot(slot: usize) -> Self {
        SlotHandle { slot: Some(slot) }
    }

    pub fn has_slot(&self) -> bool {
        self.slot.is_some()
    }
}
