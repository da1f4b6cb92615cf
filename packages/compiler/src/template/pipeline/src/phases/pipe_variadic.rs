//! Pipes that accept more than 4 arguments are variadic, and are handled with a different runtime
//! instruction.

use tracing::debug;

use crate::output::output_ast::{self as o, Expression};
use crate::template::pipeline::ir;
use crate::template::pipeline::src::compilation::CompilationJob;

/// The largest argument count with a dedicated pipe binding instruction.
const MAX_FIXED_PIPE_ARGS: usize = 4;

pub fn create_variadic_pipes(job: &mut dyn CompilationJob) {
    for unit in job.units_mut() {
        let mut converted = 0usize;
        for op in unit.update_mut().iter_mut() {
            ir::transform_expressions_in_op(
                &mut **op,
                &mut |expr, _flags| transform_pipe(expr, &mut converted),
                ir::VisitorContextFlag::NONE,
            );
        }
        if converted > 0 {
            debug!(unit = %unit.xref(), pipes = converted, "converted variadic pipes");
        }
    }
}

fn transform_pipe(expr: Expression, converted: &mut usize) -> Expression {
    match expr {
        Expression::PipeBinding(pipe) if pipe.args.len() > MAX_FIXED_PIPE_ARGS => {
            *converted += 1;
            let num_args = pipe.args.len();
            Expression::PipeBindingVariadic(ir::PipeBindingVariadicExpr::new(
                pipe.target,
                pipe.target_slot,
                pipe.name,
                o::literal_arr(pipe.args),
                num_args,
            ))
        }
        other => other,
    }
}
