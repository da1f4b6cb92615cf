//! Update Operations
//!
//! Operations executed on every change detection pass, in the update block of a template function.

use crate::output::output_ast::Expression;
use crate::template::pipeline::ir::enums::OpKind;
use crate::template::pipeline::ir::handle::{SlotHandle, XrefId};
use crate::template::pipeline::ir::operations::{Op, UpdateOp};

/// A logical representation of text with one or more interpolated expressions.
///
/// `strings` always has one more entry than `expressions`.
#[derive(Debug, Clone)]
pub struct Interpolation {
    pub strings: Vec<String>,
    pub expressions: Vec<Expression>,
}

impl Interpolation {
    pub fn new(strings: Vec<String>, expressions: Vec<Expression>) -> Self {
        debug_assert_eq!(strings.len(), expressions.len() + 1);
        Interpolation {
            strings,
            expressions,
        }
    }
}

/// The value bound by a property or attribute op.
#[derive(Debug, Clone)]
pub enum BindingExpression {
    Expression(Expression),
    Interpolation(Interpolation),
}

/// A logical operation to perform string interpolation on a text node.
#[derive(Debug, Clone)]
pub struct InterpolateTextOp {
    /// Reference to the text node to which the interpolation is bound.
    pub target: XrefId,
    pub interpolation: Interpolation,
}

impl InterpolateTextOp {
    pub fn new(target: XrefId, interpolation: Interpolation) -> Self {
        InterpolateTextOp {
            target,
            interpolation,
        }
    }
}

impl Op for InterpolateTextOp {
    fn kind(&self) -> OpKind {
        OpKind::InterpolateText
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl UpdateOp for InterpolateTextOp {
    fn target(&self) -> Option<XrefId> {
        Some(self.target)
    }
}

/// A logical operation representing binding to a property in the update IR.
#[derive(Debug, Clone)]
pub struct PropertyOp {
    /// Reference to the element on which the property is bound.
    pub target: XrefId,
    /// Name of the bound property.
    pub name: String,
    /// Expression which is bound to the property.
    pub expression: BindingExpression,
    /// The sanitizer for this property.
    pub sanitizer: Option<Expression>,
}

impl PropertyOp {
    pub fn new(target: XrefId, name: impl Into<String>, expression: BindingExpression) -> Self {
        PropertyOp {
            target,
            name: name.into(),
            expression,
            sanitizer: None,
        }
    }
}

impl Op for PropertyOp {
    fn kind(&self) -> OpKind {
        OpKind::Property
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl UpdateOp for PropertyOp {
    fn target(&self) -> Option<XrefId> {
        Some(self.target)
    }
}

/// A logical operation representing binding to an attribute in the update IR.
#[derive(Debug, Clone)]
pub struct AttributeOp {
    /// The `XrefId` of the template-like element the attribute will belong to.
    pub target: XrefId,
    /// The namespace of the attribute (or `None` if none).
    pub namespace: Option<String>,
    /// The name of the attribute.
    pub name: String,
    /// The value of the attribute.
    pub expression: BindingExpression,
    pub sanitizer: Option<Expression>,
}

impl AttributeOp {
    pub fn new(target: XrefId, name: impl Into<String>, expression: BindingExpression) -> Self {
        AttributeOp {
            target,
            namespace: None,
            name: name.into(),
            expression,
            sanitizer: None,
        }
    }
}

impl Op for AttributeOp {
    fn kind(&self) -> OpKind {
        OpKind::Attribute
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl UpdateOp for AttributeOp {
    fn target(&self) -> Option<XrefId> {
        Some(self.target)
    }
}

/// Logical operation to advance the runtime's internal slot pointer in the update IR.
#[derive(Debug, Clone)]
pub struct AdvanceOp {
    /// Delta by which to advance the pointer.
    pub delta: usize,
}

impl AdvanceOp {
    pub fn new(delta: usize) -> Self {
        AdvanceOp { delta }
    }
}

impl Op for AdvanceOp {
    fn kind(&self) -> OpKind {
        OpKind::Advance
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl UpdateOp for AdvanceOp {
    fn target(&self) -> Option<XrefId> {
        None
    }
}

/// A logical operation representing a conditional (`@if`/`@switch`) in the update IR.
///
/// It both runs in the slot context of its first branch container and refers to that container's
/// slot explicitly when selecting the active branch.
#[derive(Debug, Clone)]
pub struct ConditionalOp {
    /// The insertion point, which is the first template in the creation block belonging to this
    /// conditional.
    pub target: XrefId,
    pub target_slot: SlotHandle,
    /// The main test expression (for a switch), or `None` (for an if, which has no test
    /// expression).
    pub test: Option<Expression>,
    /// Each possible embedded view that could be displayed has a condition (or is default).
    pub conditions: Vec<Expression>,
}

impl ConditionalOp {
    pub fn new(target: XrefId, test: Option<Expression>, conditions: Vec<Expression>) -> Self {
        ConditionalOp {
            target,
            target_slot: SlotHandle::new(),
            test,
            conditions,
        }
    }
}

impl Op for ConditionalOp {
    fn kind(&self) -> OpKind {
        OpKind::Conditional
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl UpdateOp for ConditionalOp {
    fn target(&self) -> Option<XrefId> {
        Some(self.target)
    }
}

/// Feeds the collection of a `@for` block to its repeater, addressed by the repeater's slot.
#[derive(Debug, Clone)]
pub struct RepeaterOp {
    /// The `RepeaterCreate` op which this op is updating.
    pub target: XrefId,
    pub target_slot: SlotHandle,
    /// The collection provided to the for loop as its expression.
    pub collection: Expression,
}

impl RepeaterOp {
    pub fn new(target: XrefId, target_slot: SlotHandle, collection: Expression) -> Self {
        RepeaterOp {
            target,
            target_slot,
            collection,
        }
    }
}

impl Op for RepeaterOp {
    fn kind(&self) -> OpKind {
        OpKind::Repeater
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl UpdateOp for RepeaterOp {
    fn target(&self) -> Option<XrefId> {
        Some(self.target)
    }
}

/// Stores the current value of a `@let` declaration into its slot.
#[derive(Debug, Clone)]
pub struct StoreLetOp {
    /// The `DeclareLet` op whose slot receives the value.
    pub target: XrefId,
    pub declared_name: String,
    pub value: Expression,
}

impl StoreLetOp {
    pub fn new(target: XrefId, declared_name: impl Into<String>, value: Expression) -> Self {
        StoreLetOp {
            target,
            declared_name: declared_name.into(),
            value,
        }
    }
}

impl Op for StoreLetOp {
    fn kind(&self) -> OpKind {
        OpKind::StoreLet
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl UpdateOp for StoreLetOp {
    fn target(&self) -> Option<XrefId> {
        Some(self.target)
    }
}
