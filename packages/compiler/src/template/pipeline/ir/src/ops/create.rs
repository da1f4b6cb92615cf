//! Create Operations
//!
//! Operations executed once per view instance, in the creation block of a template function.

use crate::template::pipeline::ir::enums::OpKind;
use crate::template::pipeline::ir::handle::{SlotHandle, XrefId};
use crate::template::pipeline::ir::operations::{CreateOp, Op, UpdateOpList};

/// Logical operation representing the start of an element in the creation IR.
#[derive(Debug, Clone)]
pub struct ElementStartOp {
    /// XrefId allocated for this element
    pub xref: XrefId,
    /// Slot handle
    pub handle: SlotHandle,
    /// HTML tag name
    pub tag: String,
    /// Whether marked ngNonBindable
    pub non_bindable: bool,
}

impl ElementStartOp {
    pub fn new(tag: impl Into<String>, xref: XrefId) -> Self {
        ElementStartOp {
            xref,
            handle: SlotHandle::new(),
            tag: tag.into(),
            non_bindable: false,
        }
    }
}

impl Op for ElementStartOp {
    fn kind(&self) -> OpKind {
        OpKind::ElementStart
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl CreateOp for ElementStartOp {
    fn xref(&self) -> Option<XrefId> {
        Some(self.xref)
    }
}

/// Logical operation representing the end of an element structure in the creation IR.
///
/// Pairs with an `ElementStart` operation.
#[derive(Debug, Clone)]
pub struct ElementEndOp {
    /// The `XrefId` of the element declared via `ElementStart`.
    pub xref: XrefId,
}

impl ElementEndOp {
    pub fn new(xref: XrefId) -> Self {
        ElementEndOp { xref }
    }
}

impl Op for ElementEndOp {
    fn kind(&self) -> OpKind {
        OpKind::ElementEnd
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl CreateOp for ElementEndOp {
    fn xref(&self) -> Option<XrefId> {
        Some(self.xref)
    }
}

/// Logical operation representing the start of an `ng-container`.
#[derive(Debug, Clone)]
pub struct ContainerStartOp {
    pub xref: XrefId,
    pub handle: SlotHandle,
}

impl ContainerStartOp {
    pub fn new(xref: XrefId) -> Self {
        ContainerStartOp {
            xref,
            handle: SlotHandle::new(),
        }
    }
}

impl Op for ContainerStartOp {
    fn kind(&self) -> OpKind {
        OpKind::ContainerStart
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl CreateOp for ContainerStartOp {
    fn xref(&self) -> Option<XrefId> {
        Some(self.xref)
    }
}

/// Logical operation representing the end of an `ng-container`.
#[derive(Debug, Clone)]
pub struct ContainerEndOp {
    pub xref: XrefId,
}

impl ContainerEndOp {
    pub fn new(xref: XrefId) -> Self {
        ContainerEndOp { xref }
    }
}

impl Op for ContainerEndOp {
    fn kind(&self) -> OpKind {
        OpKind::ContainerEnd
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl CreateOp for ContainerEndOp {
    fn xref(&self) -> Option<XrefId> {
        Some(self.xref)
    }
}

/// Logical operation representing an embedded view declaration in the creation IR.
#[derive(Debug, Clone)]
pub struct TemplateOp {
    /// The `XrefId` of the embedded view this template declares.
    pub xref: XrefId,
    pub handle: SlotHandle,
    /// The tag name of the template's host element, if any.
    pub tag: Option<String>,
    /// Number of declaration slots used by the embedded view, once allocated.
    pub decls: Option<usize>,
}

impl TemplateOp {
    pub fn new(xref: XrefId, tag: Option<String>) -> Self {
        TemplateOp {
            xref,
            handle: SlotHandle::new(),
            tag,
            decls: None,
        }
    }
}

impl Op for TemplateOp {
    fn kind(&self) -> OpKind {
        OpKind::Template
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl CreateOp for TemplateOp {
    fn xref(&self) -> Option<XrefId> {
        Some(self.xref)
    }
}

/// Logical operation representing a text node in the creation IR.
#[derive(Debug, Clone)]
pub struct TextOp {
    pub xref: XrefId,
    pub handle: SlotHandle,
    /// The static initial value of the text node.
    pub initial_value: String,
}

impl TextOp {
    pub fn new(xref: XrefId, initial_value: impl Into<String>) -> Self {
        TextOp {
            xref,
            handle: SlotHandle::new(),
            initial_value: initial_value.into(),
        }
    }
}

impl Op for TextOp {
    fn kind(&self) -> OpKind {
        OpKind::Text
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl CreateOp for TextOp {
    fn xref(&self) -> Option<XrefId> {
        Some(self.xref)
    }
}

/// Logical operation representing an event listener on an element in the creation IR.
///
/// The handler body is a nested list of update ops with its own expression scope.
#[derive(Debug)]
pub struct ListenerOp {
    /// The element the listener is attached to.
    pub target: XrefId,
    pub target_slot: SlotHandle,
    /// Name of the event being listened to.
    pub name: String,
    /// Statements of the event handler.
    pub handler_ops: UpdateOpList,
}

impl ListenerOp {
    pub fn new(target: XrefId, name: impl Into<String>, handler_ops: UpdateOpList) -> Self {
        ListenerOp {
            target,
            target_slot: SlotHandle::new(),
            name: name.into(),
            handler_ops,
        }
    }
}

impl Op for ListenerOp {
    fn kind(&self) -> OpKind {
        OpKind::Listener
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl CreateOp for ListenerOp {
    fn xref(&self) -> Option<XrefId> {
        None
    }
}

/// An op corresponding to the instantiation of a pipe.
#[derive(Debug, Clone)]
pub struct PipeOp {
    /// XrefId reserved for this pipe instance
    pub xref: XrefId,
    /// Slot handle
    pub handle: SlotHandle,
    /// Name of the pipe
    pub name: String,
}

impl PipeOp {
    pub fn new(xref: XrefId, slot: SlotHandle, name: String) -> Self {
        PipeOp {
            xref,
            handle: slot,
            name,
        }
    }
}

impl Op for PipeOp {
    fn kind(&self) -> OpKind {
        OpKind::Pipe
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl CreateOp for PipeOp {
    fn xref(&self) -> Option<XrefId> {
        Some(self.xref)
    }
}

/// Declares a `@let` value in the creation block, reserving the slot that stores it.
#[derive(Debug, Clone)]
pub struct DeclareLetOp {
    pub xref: XrefId,
    pub handle: SlotHandle,
    pub declared_name: String,
}

impl DeclareLetOp {
    pub fn new(xref: XrefId, declared_name: impl Into<String>) -> Self {
        DeclareLetOp {
            xref,
            handle: SlotHandle::new(),
            declared_name: declared_name.into(),
        }
    }
}

impl Op for DeclareLetOp {
    fn kind(&self) -> OpKind {
        OpKind::DeclareLet
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl CreateOp for DeclareLetOp {
    fn xref(&self) -> Option<XrefId> {
        Some(self.xref)
    }
}

/// Create a `PipeOp` instantiating the pipe `name` under the identity reserved for it.
pub fn create_pipe_op(
    xref: XrefId,
    handle: SlotHandle,
    name: String,
) -> Box<dyn CreateOp + Send + Sync> {
    Box::new(PipeOp::new(xref, handle, name))
}
