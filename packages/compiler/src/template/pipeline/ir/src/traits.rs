//! IR Traits
//!
//! Capability traits of IR operations, as a bitset derived from `OpKind`. An op kind may carry any
//! combination of them.

use bitflags::bitflags;

use crate::template::pipeline::ir::enums::OpKind;
use crate::template::pipeline::ir::operations::Op;

bitflags! {
    /// Capabilities an operation kind may carry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OpTraits: u8 {
        const NONE = 0b000;
        /// Marks an operation as requiring allocation of one or more data slots for storage.
        /// Such ops expose the `XrefId` of the slot owner through `CreateOp::xref`.
        const CONSUMES_SLOT = 0b001;
        /// Marks an operation as depending on the runtime's implicit slot context being set to
        /// the slot of its `target`, via `advance()`, prior to execution.
        const DEPENDS_ON_SLOT_CONTEXT = 0b010;
        /// Marks an operation as referring to the slot index of its `target` explicitly.
        const USES_SLOT_INDEX = 0b100;
    }
}

/// The capabilities carried by every operation of the given kind.
pub fn op_kind_traits(kind: OpKind) -> OpTraits {
    match kind {
        OpKind::ElementStart
        | OpKind::ContainerStart
        | OpKind::Template
        | OpKind::Text
        | OpKind::Pipe
        | OpKind::DeclareLet => OpTraits::CONSUMES_SLOT,
        OpKind::InterpolateText | OpKind::Property | OpKind::Attribute | OpKind::StoreLet => {
            OpTraits::DEPENDS_ON_SLOT_CONTEXT
        }
        OpKind::Conditional => OpTraits::DEPENDS_ON_SLOT_CONTEXT | OpTraits::USES_SLOT_INDEX,
        OpKind::Repeater => OpTraits::USES_SLOT_INDEX,
        OpKind::ListEnd
        | OpKind::Statement
        | OpKind::Variable
        | OpKind::ElementEnd
        | OpKind::ContainerEnd
        | OpKind::Listener
        | OpKind::Advance => OpTraits::NONE,
    }
}

/// Test whether an operation implements `ConsumesSlot`.
pub fn has_consumes_slot_trait<O: Op + ?Sized>(op: &O) -> bool {
    op_kind_traits(op.kind()).contains(OpTraits::CONSUMES_SLOT)
}

/// Test whether an operation implements `DependsOnSlotContext`.
pub fn has_depends_on_slot_context_trait<O: Op + ?Sized>(op: &O) -> bool {
    op_kind_traits(op.kind()).contains(OpTraits::DEPENDS_ON_SLOT_CONTEXT)
}

/// Test whether an operation implements `UsesSlotIndex`.
pub fn has_uses_slot_index_trait<O: Op + ?Sized>(op: &O) -> bool {
    op_kind_traits(op.kind()).contains(OpTraits::USES_SLOT_INDEX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_consumes_a_slot() {
        assert_eq!(op_kind_traits(OpKind::Pipe), OpTraits::CONSUMES_SLOT);
    }

    #[test]
    fn conditional_carries_both_slot_context_traits() {
        let traits = op_kind_traits(OpKind::Conditional);
        assert!(traits.contains(OpTraits::DEPENDS_ON_SLOT_CONTEXT));
        assert!(traits.contains(OpTraits::USES_SLOT_INDEX));
        assert!(!traits.contains(OpTraits::CONSUMES_SLOT));
    }

    #[test]
    fn list_end_and_listeners_carry_nothing() {
        assert!(op_kind_traits(OpKind::ListEnd).is_empty());
        assert!(op_kind_traits(OpKind::Listener).is_empty());
        assert!(op_kind_traits(OpKind::Variable).is_empty());
    }
}
