/*
 * Test Utilities
 *
 * Builders for hand-assembled IR and a compact rendering of creation blocks.
 */
#![allow(dead_code)]

use angular_template_pipeline::ir::{self, CreateOp, Op, UpdateOp, XrefId};
use angular_template_pipeline::output::output_ast as o;

pub type BoxedCreateOp = Box<dyn CreateOp + Send + Sync>;
pub type BoxedUpdateOp = Box<dyn UpdateOp + Send + Sync>;

pub fn xref(id: usize) -> XrefId {
    XrefId::new(id)
}

pub fn var(name: &str) -> o::Expression {
    *o::variable(name)
}

/// `args[0] | name:args[1]:...` with the pipe instance reserved under `target`.
pub fn pipe(target: usize, name: &str, args: Vec<o::Expression>) -> o::Expression {
    o::Expression::PipeBinding(ir::PipeBindingExpr::new(
        xref(target),
        ir::SlotHandle::new(),
        name.to_string(),
        args,
    ))
}

pub fn element(id: usize) -> BoxedCreateOp {
    Box::new(ir::ElementStartOp::new("div", xref(id)))
}

pub fn element_end(id: usize) -> BoxedCreateOp {
    Box::new(ir::ElementEndOp::new(xref(id)))
}

pub fn text(id: usize) -> BoxedCreateOp {
    Box::new(ir::TextOp::new(xref(id), ""))
}

pub fn template(id: usize) -> BoxedCreateOp {
    Box::new(ir::TemplateOp::new(xref(id), Some("ng-template".to_string())))
}

pub fn property(target: usize, expr: o::Expression) -> BoxedUpdateOp {
    Box::new(ir::PropertyOp::new(
        xref(target),
        "value",
        ir::BindingExpression::Expression(expr),
    ))
}

pub fn interpolate_text(target: usize, expr: o::Expression) -> BoxedUpdateOp {
    Box::new(ir::InterpolateTextOp::new(
        xref(target),
        ir::Interpolation::new(vec![String::new(), String::new()], vec![expr]),
    ))
}

/// Render a creation block as `Kind(xref)` entries, with pipes as `Pipe(xref, name)`.
pub fn create_summary(create: &ir::CreateOpList) -> Vec<String> {
    create
        .iter()
        .map(|op| match op.as_any().downcast_ref::<ir::PipeOp>() {
            Some(pipe) => format!("Pipe({}, {})", pipe.xref.as_usize(), pipe.name),
            None => match op.xref() {
                Some(xref) => format!("{:?}({})", op.kind(), xref.as_usize()),
                None => format!("{:?}", op.kind()),
            },
        })
        .collect()
}
