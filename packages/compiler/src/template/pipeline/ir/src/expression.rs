//! IR Expressions
//!
//! Logical expression nodes embedded into the output AST, plus the utilities phases use to visit
//! and transform every expression held by an operation.

use bitflags::bitflags;

use crate::output::output_ast::{ArrowFunctionBody, Expression, Statement};
use crate::template::pipeline::ir::enums::{ExpressionKind, OpKind};
use crate::template::pipeline::ir::handle::{SlotHandle, XrefId};
use crate::template::pipeline::ir::operations::Op;
use crate::template::pipeline::ir::ops::create::ListenerOp;
use crate::template::pipeline::ir::ops::shared::{StatementOp, VariableOp};
use crate::template::pipeline::ir::ops::update::{
    AttributeOp, BindingExpression, ConditionalOp, InterpolateTextOp, Interpolation, PropertyOp,
    RepeaterOp, StoreLetOp,
};

bitflags! {
    /// Flags for visitor context when transforming expressions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct VisitorContextFlag: u32 {
        const NONE = 0b0000;
        /// The expression sits in the private scope of a child operation, such as a listener
        /// handler or a pure function body.
        const IN_CHILD_OPERATION = 0b0001;
    }
}

/// Check whether a given `Expression` is a logical IR expression type.
pub fn is_ir_expression(expr: &Expression) -> bool {
    ir_expression_kind(expr).is_some()
}

/// The `ExpressionKind` of `expr`, or `None` for plain output AST nodes.
pub fn ir_expression_kind(expr: &Expression) -> Option<ExpressionKind> {
    let kind = match expr {
        Expression::LexicalRead(_) => ExpressionKind::LexicalRead,
        Expression::Context(_) => ExpressionKind::Context,
        Expression::ReadVariable(_) => ExpressionKind::ReadVariable,
        Expression::PureFunction(_) => ExpressionKind::PureFunctionExpr,
        Expression::PureFunctionParameter(_) => ExpressionKind::PureFunctionParameterExpr,
        Expression::PipeBinding(_) => ExpressionKind::PipeBinding,
        Expression::PipeBindingVariadic(_) => ExpressionKind::PipeBindingVariadic,
        Expression::SafePropertyRead(_) => ExpressionKind::SafePropertyRead,
        Expression::Empty(_) => ExpressionKind::EmptyExpr,
        Expression::ReadVar(_)
        | Expression::ReadProp(_)
        | Expression::ReadKey(_)
        | Expression::InvokeFn(_)
        | Expression::Literal(_)
        | Expression::LiteralArray(_)
        | Expression::LiteralMap(_)
        | Expression::BinaryOp(_)
        | Expression::Conditional(_)
        | Expression::NotExpr(_)
        | Expression::ArrowFn(_) => return None,
    };
    Some(kind)
}

/// Logical expression representing a lexical read of a variable name.
#[derive(Debug, Clone)]
pub struct LexicalReadExpr {
    pub name: String,
}

impl LexicalReadExpr {
    pub fn new(name: impl Into<String>) -> Self {
        LexicalReadExpr { name: name.into() }
    }
}

/// Runtime operation to retrieve the context of a view.
#[derive(Debug, Clone)]
pub struct ContextExpr {
    pub view: XrefId,
}

impl ContextExpr {
    pub fn new(view: XrefId) -> Self {
        ContextExpr { view }
    }
}

/// Read of a variable declared as an `ir.VariableOp` and referenced through its `XrefId`.
#[derive(Debug, Clone)]
pub struct ReadVariableExpr {
    pub xref: XrefId,
    pub name: Option<String>,
}

impl ReadVariableExpr {
    pub fn new(xref: XrefId) -> Self {
        ReadVariableExpr { xref, name: None }
    }
}

/// Defines and calls a function with change-detected arguments.
#[derive(Debug, Clone)]
pub struct PureFunctionExpr {
    pub var_offset: Option<usize>,
    /// The expression which should be memoized as a pure computation.
    /// This expression contains internal `PureFunctionParameterExpr`s, which are placeholders for the
    /// positional argument expressions in `args`.
    pub body: Option<Box<Expression>>,
    /// Positional arguments to the pure function which will memoize the `body` expression, which act
    /// as memoization keys.
    pub args: Vec<Expression>,
    /// Once extracted to the constant pool, a reference to the function which defines the
    /// computation of `body`.
    pub fn_: Option<Box<Expression>>,
}

impl PureFunctionExpr {
    pub fn new(expression: Option<Box<Expression>>, args: Vec<Expression>) -> Self {
        PureFunctionExpr {
            var_offset: None,
            body: expression,
            args,
            fn_: None,
        }
    }
}

/// Indicates a positional parameter to a pure function definition.
#[derive(Debug, Clone)]
pub struct PureFunctionParameterExpr {
    pub index: usize,
}

impl PureFunctionParameterExpr {
    pub fn new(index: usize) -> Self {
        PureFunctionParameterExpr { index }
    }
}

/// Binding to a pipe transformation.
#[derive(Debug, Clone)]
pub struct PipeBindingExpr {
    pub var_offset: Option<usize>,
    /// The `XrefId` reserved for the pipe instance this binding invokes.
    pub target: XrefId,
    pub target_slot: SlotHandle,
    pub name: String,
    pub args: Vec<Expression>,
}

impl PipeBindingExpr {
    pub fn new(target: XrefId, target_slot: SlotHandle, name: String, args: Vec<Expression>) -> Self {
        PipeBindingExpr {
            var_offset: None,
            target,
            target_slot,
            name,
            args,
        }
    }
}

/// Binding to a pipe transformation with a variable number of arguments.
#[derive(Debug, Clone)]
pub struct PipeBindingVariadicExpr {
    pub var_offset: Option<usize>,
    pub target: XrefId,
    pub target_slot: SlotHandle,
    pub name: String,
    /// A literal array holding every argument.
    pub args: Box<Expression>,
    pub num_args: usize,
}

impl PipeBindingVariadicExpr {
    pub fn new(
        target: XrefId,
        target_slot: SlotHandle,
        name: String,
        args: Box<Expression>,
        num_args: usize,
    ) -> Self {
        PipeBindingVariadicExpr {
            var_offset: None,
            target,
            target_slot,
            name,
            args,
            num_args,
        }
    }
}

/// A safe property read requiring expansion into a null check.
#[derive(Debug, Clone)]
pub struct SafePropertyReadExpr {
    pub receiver: Box<Expression>,
    pub name: String,
}

impl SafePropertyReadExpr {
    pub fn new(receiver: Box<Expression>, name: impl Into<String>) -> Self {
        SafePropertyReadExpr {
            receiver,
            name: name.into(),
        }
    }
}

/// An empty expression that will be stripped before generating the final output.
#[derive(Debug, Clone, Default)]
pub struct EmptyExpr;

impl EmptyExpr {
    pub fn new() -> Self {
        EmptyExpr
    }
}

/// Visits all `Expression`s in the AST of `expr` with the `visitor` function.
///
/// Nested expressions are visited before the expression containing them.
pub fn visit_expressions_in_expression(
    expr: &Expression,
    visitor: &mut dyn FnMut(&Expression, VisitorContextFlag),
    flags: VisitorContextFlag,
) {
    match expr {
        Expression::ReadProp(prop) => visit_expressions_in_expression(&prop.receiver, visitor, flags),
        Expression::ReadKey(key) => {
            visit_expressions_in_expression(&key.receiver, visitor, flags);
            visit_expressions_in_expression(&key.index, visitor, flags);
        }
        Expression::InvokeFn(invoke) => {
            visit_expressions_in_expression(&invoke.fn_, visitor, flags);
            for arg in &invoke.args {
                visit_expressions_in_expression(arg, visitor, flags);
            }
        }
        Expression::LiteralArray(arr) => {
            for entry in &arr.entries {
                visit_expressions_in_expression(entry, visitor, flags);
            }
        }
        Expression::LiteralMap(map) => {
            for entry in &map.entries {
                visit_expressions_in_expression(&entry.value, visitor, flags);
            }
        }
        Expression::BinaryOp(bin) => {
            visit_expressions_in_expression(&bin.lhs, visitor, flags);
            visit_expressions_in_expression(&bin.rhs, visitor, flags);
        }
        Expression::Conditional(cond) => {
            visit_expressions_in_expression(&cond.condition, visitor, flags);
            visit_expressions_in_expression(&cond.true_case, visitor, flags);
            if let Some(false_case) = &cond.false_case {
                visit_expressions_in_expression(false_case, visitor, flags);
            }
        }
        Expression::NotExpr(not) => visit_expressions_in_expression(&not.condition, visitor, flags),
        Expression::ArrowFn(arrow) => match &arrow.body {
            ArrowFunctionBody::Expression(body) => {
                visit_expressions_in_expression(body, visitor, flags)
            }
            ArrowFunctionBody::Statements(stmts) => {
                for stmt in stmts {
                    visit_expressions_in_statement(stmt, visitor, flags);
                }
            }
        },
        Expression::PureFunction(pure) => {
            if let Some(body) = &pure.body {
                visit_expressions_in_expression(
                    body,
                    visitor,
                    flags | VisitorContextFlag::IN_CHILD_OPERATION,
                );
            } else if let Some(fn_) = &pure.fn_ {
                visit_expressions_in_expression(fn_, visitor, flags);
            }
            for arg in &pure.args {
                visit_expressions_in_expression(arg, visitor, flags);
            }
        }
        Expression::PipeBinding(pipe) => {
            for arg in &pipe.args {
                visit_expressions_in_expression(arg, visitor, flags);
            }
        }
        Expression::PipeBindingVariadic(pipe) => {
            visit_expressions_in_expression(&pipe.args, visitor, flags)
        }
        Expression::SafePropertyRead(safe) => {
            visit_expressions_in_expression(&safe.receiver, visitor, flags)
        }
        Expression::ReadVar(_)
        | Expression::Literal(_)
        | Expression::LexicalRead(_)
        | Expression::Context(_)
        | Expression::ReadVariable(_)
        | Expression::PureFunctionParameter(_)
        | Expression::Empty(_) => {}
    }

    visitor(expr, flags);
}

/// Visits all `Expression`s in the AST of `stmt` with the `visitor` function.
pub fn visit_expressions_in_statement(
    stmt: &Statement,
    visitor: &mut dyn FnMut(&Expression, VisitorContextFlag),
    flags: VisitorContextFlag,
) {
    match stmt {
        Statement::DeclareVar(declare_var) => {
            if let Some(value) = &declare_var.value {
                visit_expressions_in_expression(value, visitor, flags);
            }
        }
        Statement::Expression(expr_stmt) => {
            visit_expressions_in_expression(&expr_stmt.expr, visitor, flags)
        }
        Statement::Return(return_stmt) => {
            visit_expressions_in_expression(&return_stmt.value, visitor, flags)
        }
    }
}

/// Visits all `Expression`s in the AST of `op` with the `visitor` function.
///
/// Expressions owned by a child operation (e.g. the handler ops of a listener) are reported with
/// `VisitorContextFlag::IN_CHILD_OPERATION` set.
pub fn visit_expressions_in_op<O: Op + ?Sized>(
    op: &O,
    visitor: &mut dyn FnMut(&Expression, VisitorContextFlag),
) {
    visit_expressions_in_op_with_flags(op, visitor, VisitorContextFlag::NONE);
}

fn visit_expressions_in_op_with_flags<O: Op + ?Sized>(
    op: &O,
    visitor: &mut dyn FnMut(&Expression, VisitorContextFlag),
    flags: VisitorContextFlag,
) {
    match op.kind() {
        OpKind::Property => {
            let op = downcast::<PropertyOp, _>(op);
            visit_binding_expression(&op.expression, visitor, flags);
            if let Some(sanitizer) = &op.sanitizer {
                visit_expressions_in_expression(sanitizer, visitor, flags);
            }
        }
        OpKind::Attribute => {
            let op = downcast::<AttributeOp, _>(op);
            visit_binding_expression(&op.expression, visitor, flags);
            if let Some(sanitizer) = &op.sanitizer {
                visit_expressions_in_expression(sanitizer, visitor, flags);
            }
        }
        OpKind::InterpolateText => {
            let op = downcast::<InterpolateTextOp, _>(op);
            visit_interpolation(&op.interpolation, visitor, flags);
        }
        OpKind::Conditional => {
            let op = downcast::<ConditionalOp, _>(op);
            if let Some(test) = &op.test {
                visit_expressions_in_expression(test, visitor, flags);
            }
            for condition in &op.conditions {
                visit_expressions_in_expression(condition, visitor, flags);
            }
        }
        OpKind::Repeater => {
            let op = downcast::<RepeaterOp, _>(op);
            visit_expressions_in_expression(&op.collection, visitor, flags);
        }
        OpKind::StoreLet => {
            let op = downcast::<StoreLetOp, _>(op);
            visit_expressions_in_expression(&op.value, visitor, flags);
        }
        OpKind::Statement => {
            let op = downcast::<StatementOp, _>(op);
            visit_expressions_in_statement(&op.statement, visitor, flags);
        }
        OpKind::Variable => {
            let op = downcast::<VariableOp, _>(op);
            visit_expressions_in_expression(&op.initializer, visitor, flags);
        }
        OpKind::Listener => {
            let op = downcast::<ListenerOp, _>(op);
            for handler_op in op.handler_ops.iter() {
                visit_expressions_in_op_with_flags(
                    &**handler_op,
                    visitor,
                    flags | VisitorContextFlag::IN_CHILD_OPERATION,
                );
            }
        }
        // These operations contain no expressions.
        OpKind::ListEnd
        | OpKind::ElementStart
        | OpKind::ElementEnd
        | OpKind::ContainerStart
        | OpKind::ContainerEnd
        | OpKind::Template
        | OpKind::Text
        | OpKind::Advance
        | OpKind::Pipe
        | OpKind::DeclareLet => {}
    }
}

fn visit_binding_expression(
    expression: &BindingExpression,
    visitor: &mut dyn FnMut(&Expression, VisitorContextFlag),
    flags: VisitorContextFlag,
) {
    match expression {
        BindingExpression::Expression(expr) => {
            visit_expressions_in_expression(expr, visitor, flags)
        }
        BindingExpression::Interpolation(interpolation) => {
            visit_interpolation(interpolation, visitor, flags)
        }
    }
}

fn visit_interpolation(
    interpolation: &Interpolation,
    visitor: &mut dyn FnMut(&Expression, VisitorContextFlag),
    flags: VisitorContextFlag,
) {
    for expr in &interpolation.expressions {
        visit_expressions_in_expression(expr, visitor, flags);
    }
}

/// Transform all `Expression`s in the AST of `expr` with the `transform` function.
/// All such operations will be replaced with the result of applying `transform`, which may be an
/// identity transformation.
pub fn transform_expressions_in_expression(
    mut expr: Expression,
    transform: &mut dyn FnMut(Expression, VisitorContextFlag) -> Expression,
    flags: VisitorContextFlag,
) -> Expression {
    match &mut expr {
        Expression::ReadProp(prop) => transform_in_place(&mut prop.receiver, transform, flags),
        Expression::ReadKey(key) => {
            transform_in_place(&mut key.receiver, transform, flags);
            transform_in_place(&mut key.index, transform, flags);
        }
        Expression::InvokeFn(invoke) => {
            transform_in_place(&mut invoke.fn_, transform, flags);
            for arg in &mut invoke.args {
                transform_in_place(arg, transform, flags);
            }
        }
        Expression::LiteralArray(arr) => {
            for entry in &mut arr.entries {
                transform_in_place(entry, transform, flags);
            }
        }
        Expression::LiteralMap(map) => {
            for entry in &mut map.entries {
                transform_in_place(&mut entry.value, transform, flags);
            }
        }
        Expression::BinaryOp(bin) => {
            transform_in_place(&mut bin.lhs, transform, flags);
            transform_in_place(&mut bin.rhs, transform, flags);
        }
        Expression::Conditional(cond) => {
            transform_in_place(&mut cond.condition, transform, flags);
            transform_in_place(&mut cond.true_case, transform, flags);
            if let Some(false_case) = &mut cond.false_case {
                transform_in_place(false_case, transform, flags);
            }
        }
        Expression::NotExpr(not) => transform_in_place(&mut not.condition, transform, flags),
        Expression::ArrowFn(arrow) => match &mut arrow.body {
            ArrowFunctionBody::Expression(body) => transform_in_place(body, transform, flags),
            ArrowFunctionBody::Statements(stmts) => {
                for stmt in stmts {
                    transform_expressions_in_statement(stmt, transform, flags);
                }
            }
        },
        Expression::PureFunction(pure) => {
            if let Some(body) = &mut pure.body {
                transform_in_place(body, transform, flags | VisitorContextFlag::IN_CHILD_OPERATION);
            } else if let Some(fn_) = &mut pure.fn_ {
                transform_in_place(fn_, transform, flags);
            }
            for arg in &mut pure.args {
                transform_in_place(arg, transform, flags);
            }
        }
        Expression::PipeBinding(pipe) => {
            for arg in &mut pipe.args {
                transform_in_place(arg, transform, flags);
            }
        }
        Expression::PipeBindingVariadic(pipe) => transform_in_place(&mut pipe.args, transform, flags),
        Expression::SafePropertyRead(safe) => {
            transform_in_place(&mut safe.receiver, transform, flags)
        }
        Expression::ReadVar(_)
        | Expression::Literal(_)
        | Expression::LexicalRead(_)
        | Expression::Context(_)
        | Expression::ReadVariable(_)
        | Expression::PureFunctionParameter(_)
        | Expression::Empty(_) => {}
    }

    // Apply the transform function to the expression itself
    transform(expr, flags)
}

/// Transform all `Expression`s in the AST of `stmt` with the `transform` function.
pub fn transform_expressions_in_statement(
    stmt: &mut Statement,
    transform: &mut dyn FnMut(Expression, VisitorContextFlag) -> Expression,
    flags: VisitorContextFlag,
) {
    match stmt {
        Statement::DeclareVar(declare_var) => {
            if let Some(value) = &mut declare_var.value {
                transform_in_place(value, transform, flags);
            }
        }
        Statement::Expression(expr_stmt) => transform_in_place(&mut expr_stmt.expr, transform, flags),
        Statement::Return(return_stmt) => {
            transform_in_place(&mut return_stmt.value, transform, flags)
        }
    }
}

/// Transform all `Expression`s in the AST of `op` with the `transform` function.
pub fn transform_expressions_in_op<O: Op + ?Sized>(
    op: &mut O,
    transform: &mut dyn FnMut(Expression, VisitorContextFlag) -> Expression,
    flags: VisitorContextFlag,
) {
    match op.kind() {
        OpKind::Property => {
            let op = downcast_mut::<PropertyOp, _>(op);
            transform_binding_expression(&mut op.expression, transform, flags);
            if let Some(sanitizer) = &mut op.sanitizer {
                transform_in_place(sanitizer, transform, flags);
            }
        }
        OpKind::Attribute => {
            let op = downcast_mut::<AttributeOp, _>(op);
            transform_binding_expression(&mut op.expression, transform, flags);
            if let Some(sanitizer) = &mut op.sanitizer {
                transform_in_place(sanitizer, transform, flags);
            }
        }
        OpKind::InterpolateText => {
            let op = downcast_mut::<InterpolateTextOp, _>(op);
            transform_interpolation(&mut op.interpolation, transform, flags);
        }
        OpKind::Conditional => {
            let op = downcast_mut::<ConditionalOp, _>(op);
            if let Some(test) = &mut op.test {
                transform_in_place(test, transform, flags);
            }
            for condition in &mut op.conditions {
                transform_in_place(condition, transform, flags);
            }
        }
        OpKind::Repeater => {
            let op = downcast_mut::<RepeaterOp, _>(op);
            transform_in_place(&mut op.collection, transform, flags);
        }
        OpKind::StoreLet => {
            let op = downcast_mut::<StoreLetOp, _>(op);
            transform_in_place(&mut op.value, transform, flags);
        }
        OpKind::Statement => {
            let op = downcast_mut::<StatementOp, _>(op);
            transform_expressions_in_statement(&mut op.statement, transform, flags);
        }
        OpKind::Variable => {
            let op = downcast_mut::<VariableOp, _>(op);
            transform_in_place(&mut op.initializer, transform, flags);
        }
        OpKind::Listener => {
            let op = downcast_mut::<ListenerOp, _>(op);
            for handler_op in op.handler_ops.iter_mut() {
                transform_expressions_in_op(
                    &mut **handler_op,
                    transform,
                    flags | VisitorContextFlag::IN_CHILD_OPERATION,
                );
            }
        }
        // These operations contain no expressions.
        OpKind::ListEnd
        | OpKind::ElementStart
        | OpKind::ElementEnd
        | OpKind::ContainerStart
        | OpKind::ContainerEnd
        | OpKind::Template
        | OpKind::Text
        | OpKind::Advance
        | OpKind::Pipe
        | OpKind::DeclareLet => {}
    }
}

fn transform_binding_expression(
    expression: &mut BindingExpression,
    transform: &mut dyn FnMut(Expression, VisitorContextFlag) -> Expression,
    flags: VisitorContextFlag,
) {
    match expression {
        BindingExpression::Expression(expr) => transform_in_place(expr, transform, flags),
        BindingExpression::Interpolation(interpolation) => {
            transform_interpolation(interpolation, transform, flags)
        }
    }
}

fn transform_interpolation(
    interpolation: &mut Interpolation,
    transform: &mut dyn FnMut(Expression, VisitorContextFlag) -> Expression,
    flags: VisitorContextFlag,
) {
    for expr in &mut interpolation.expressions {
        transform_in_place(expr, transform, flags);
    }
}

fn transform_in_place(
    expr: &mut Expression,
    transform: &mut dyn FnMut(Expression, VisitorContextFlag) -> Expression,
    flags: VisitorContextFlag,
) {
    let owned = std::mem::replace(expr, Expression::Empty(EmptyExpr));
    *expr = transform_expressions_in_expression(owned, transform, flags);
}

fn downcast<T: 'static, O: Op + ?Sized>(op: &O) -> &T {
    match op.as_any().downcast_ref::<T>() {
        Some(concrete) => concrete,
        None => panic!(
            "AssertionError: {:?} op is not a {}",
            op.kind(),
            std::any::type_name::<T>()
        ),
    }
}

fn downcast_mut<T: 'static, O: Op + ?Sized>(op: &mut O) -> &mut T {
    let kind = op.kind();
    match op.as_any_mut().downcast_mut::<T>() {
        Some(concrete) => concrete,
        None => panic!(
            "AssertionError: {:?} op is not a {}",
            kind,
            std::any::type_name::<T>()
        ),
    }
}
