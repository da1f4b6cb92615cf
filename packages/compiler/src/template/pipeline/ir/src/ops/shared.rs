//! Shared Operations
//!
//! Operation types valid in both the creation and the update IR.

use crate::output::output_ast::{Expression, Statement};
use crate::template::pipeline::ir::enums::OpKind;
use crate::template::pipeline::ir::handle::XrefId;
use crate::template::pipeline::ir::operations::{CreateOp, Op, UpdateOp};

/// Statement operation - wraps an output AST statement
#[derive(Debug, Clone)]
pub struct StatementOp {
    pub statement: Statement,
}

impl StatementOp {
    pub fn new(statement: Statement) -> Self {
        StatementOp { statement }
    }
}

impl Op for StatementOp {
    fn kind(&self) -> OpKind {
        OpKind::Statement
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl CreateOp for StatementOp {
    fn xref(&self) -> Option<XrefId> {
        None
    }
}

impl UpdateOp for StatementOp {
    fn target(&self) -> Option<XrefId> {
        None
    }
}

/// Variable operation - declares and initializes a semantic variable.
#[derive(Debug, Clone)]
pub struct VariableOp {
    /// `XrefId` which identifies this specific variable, and is used to reference this variable from
    /// other parts of the IR.
    pub xref: XrefId,
    /// Name of the variable, once naming has run.
    pub name: Option<String>,
    /// Expression representing the value of the variable.
    pub initializer: Expression,
}

impl VariableOp {
    pub fn new(xref: XrefId, initializer: Expression) -> Self {
        VariableOp {
            xref,
            name: None,
            initializer,
        }
    }
}

impl Op for VariableOp {
    fn kind(&self) -> OpKind {
        OpKind::Variable
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl CreateOp for VariableOp {
    fn xref(&self) -> Option<XrefId> {
        Some(self.xref)
    }
}

impl UpdateOp for VariableOp {
    fn target(&self) -> Option<XrefId> {
        None
    }
}
