//! Generate pipe creation instructions.
//!
//! Every pipe binding in an update op needs a pipe instance created in the same view. This phase
//! finds those bindings and adds a `PipeOp` to the view's creation block for each of them.

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::error::{InternalError, Result};
use crate::output::output_ast::Expression;
use crate::template::pipeline::ir;
use crate::template::pipeline::src::compilation::{CompilationJob, CompilationUnit};

/// A pipe instance which still has to be added to its unit's creation block.
#[derive(Debug)]
struct PendingPipe {
    /// Creation op the pipe is placed after in compatibility mode.
    anchor: ir::XrefId,
    xref: ir::XrefId,
    handle: ir::SlotHandle,
    name: String,
}

type PendingPipes = SmallVec<[PendingPipe; 8]>;

/// Create a `PipeOp` for every pipe binding in the job.
///
/// All units are validated before any creation block is modified, so an invalid pipe binding leaves
/// the job untouched.
pub fn create_pipes(job: &mut dyn CompilationJob) -> Result<()> {
    let compatibility = job.compatibility();

    let pending = job
        .units()
        .map(collect_pipe_bindings)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    for (unit, pipes) in job.units_mut().zip(pending) {
        let count = pipes.len();
        let create = unit.create_mut();
        for pipe in pipes {
            match compatibility {
                ir::CompatibilityMode::TemplateDefinitionBuilder => {
                    add_pipe_to_creation_block(create, pipe)?;
                }
                ir::CompatibilityMode::Normal => {
                    // Appending allows more chaining opportunities for later phases.
                    trace!(pipe = %pipe.name, xref = %pipe.xref, "appending pipe");
                    create.push(ir::create_pipe_op(pipe.xref, pipe.handle, pipe.name));
                }
            }
        }
        debug!(unit = %unit.xref(), pipes = count, "created pipes");
    }

    Ok(())
}

fn collect_pipe_bindings(
    unit: &dyn CompilationUnit,
) -> std::result::Result<PendingPipes, InternalError> {
    let mut pipes = PendingPipes::new();

    for op in unit.update().iter() {
        let mut failure = None;
        ir::visit_expressions_in_op(&**op, &mut |expr, flags| {
            if failure.is_some() {
                return;
            }
            let (xref, handle, name) = match expr {
                Expression::PipeBinding(pipe) => (pipe.target, pipe.target_slot, &pipe.name),
                Expression::PipeBindingVariadic(pipe) => {
                    (pipe.target, pipe.target_slot, &pipe.name)
                }
                _ => return,
            };
            match pipe_anchor(&**op, name, flags) {
                Ok(anchor) => pipes.push(PendingPipe {
                    anchor,
                    xref,
                    handle,
                    name: name.clone(),
                }),
                Err(err) => failure = Some(err),
            }
        });
        if let Some(err) = failure {
            return Err(err);
        }
    }

    Ok(pipes)
}

/// The xref of the creation op that `op` is associated with, which must consume a slot (either
/// because `op` depends on the ambient context of `target`, or merely references its slot).
fn pipe_anchor<O: ir::UpdateOp + ?Sized>(
    op: &O,
    name: &str,
    flags: ir::VisitorContextFlag,
) -> std::result::Result<ir::XrefId, InternalError> {
    if flags.contains(ir::VisitorContextFlag::IN_CHILD_OPERATION) {
        return Err(InternalError::PipeInChildOperation {
            name: name.to_string(),
        });
    }

    let non_slot = || InternalError::PipeOnNonSlotOperation {
        name: name.to_string(),
        kind: op.kind(),
    };
    if !ir::has_depends_on_slot_context_trait(op) && !ir::has_uses_slot_index_trait(op) {
        return Err(non_slot());
    }
    op.target().ok_or_else(non_slot)
}

/// Insert the pipe directly after its anchor, behind any pipes already chained onto it.
fn add_pipe_to_creation_block(
    create: &mut ir::CreateOpList,
    pipe: PendingPipe,
) -> std::result::Result<(), InternalError> {
    let mut handle = create.first();
    while create.op_kind(handle) != ir::OpKind::ListEnd {
        let is_anchor = create.get(handle).is_some_and(|op| {
            ir::has_consumes_slot_trait(&**op) && op.xref() == Some(pipe.anchor)
        });
        if !is_anchor {
            handle = create.next(handle);
            continue;
        }

        while create.op_kind(create.next(handle)) == ir::OpKind::Pipe {
            handle = create.next(handle);
        }

        trace!(pipe = %pipe.name, xref = %pipe.xref, anchor = %pipe.anchor, "inserting pipe");
        let before = create.next(handle);
        create.insert_before(ir::create_pipe_op(pipe.xref, pipe.handle, pipe.name), before);
        return Ok(());
    }

    Err(InternalError::MissingPipeAnchor {
        name: pipe.name,
        target: pipe.anchor,
    })
}
