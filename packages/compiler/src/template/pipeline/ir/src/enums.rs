//! IR Enums
//!
//! Discriminants for operations and expressions in the template IR.

use serde::{Deserialize, Serialize};

/// Distinguishes different kinds of IR operations.
///
/// Includes both creation and update operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    /// A special operation type which is used to represent the beginning and end nodes of a linked
    /// list of operations.
    ListEnd,
    /// An operation which wraps an output AST statement.
    Statement,
    /// An operation which declares and initializes a `SemanticVariable`.
    Variable,
    /// An operation to begin rendering of an element.
    ElementStart,
    /// An operation which declares an embedded view.
    Template,
    /// An operation to end rendering of an element previously started with `ElementStart`.
    ElementEnd,
    /// An operation to begin an `ng-container`.
    ContainerStart,
    /// An operation to end an `ng-container`.
    ContainerEnd,
    /// An operation to render a text node.
    Text,
    /// An operation declaring an event listener for an element.
    Listener,
    /// An operation to interpolate text into a text node.
    InterpolateText,
    /// An operation to bind an expression to a property of an element.
    Property,
    /// An operation to bind an expression to an attribute of an element.
    Attribute,
    /// An operation to advance the runtime's implicit slot context during the update phase.
    Advance,
    /// An operation to instantiate a pipe.
    Pipe,
    /// An update-time operation selecting the active branch of a conditional.
    Conditional,
    /// An update-time operation feeding a collection to a repeater.
    Repeater,
    /// An operation to declare a `@let` slot.
    DeclareLet,
    /// An update-time operation storing the value of a `@let` declaration.
    StoreLet,
}

/// Distinguishes different kinds of IR expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpressionKind {
    /// Read of a variable in a lexical scope.
    LexicalRead,
    /// Runtime operation to retrieve the value of a local reference.
    Context,
    /// A reference to a `SemanticVariable`.
    ReadVariable,
    /// Defines and calls a function with change-detected arguments.
    PureFunctionExpr,
    /// Indicates a positional parameter to a pure function definition.
    PureFunctionParameterExpr,
    /// Binding to a pipe transformation.
    PipeBinding,
    /// Binding to a pipe transformation with a variable number of arguments.
    PipeBindingVariadic,
    /// A safe property read requiring expansion into a null check.
    SafePropertyRead,
    /// An empty expression that will be stripped before generating the final output.
    EmptyExpr,
}

/// Ordering policy applied by phases whose output order is observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompatibilityMode {
    #[default]
    Normal,
    /// Reproduce the instruction order of the `TemplateDefinitionBuilder` compiler.
    TemplateDefinitionBuilder,
}
