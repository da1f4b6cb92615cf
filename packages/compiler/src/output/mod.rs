//! Output Module
//!
//! The output AST that template expressions are lowered into.

pub mod output_ast;
