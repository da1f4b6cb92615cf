#![deny(clippy::all)]

/**
 * Angular Template Pipeline
 *
 * Intermediate representation of Angular template instructions and the phases which lower it.
 */

mod config;
mod error;

pub mod output;
pub mod template;

// Re-exports
pub use config::PipelineConfig;
pub use error::{CompilerError, InternalError, Result};
pub use template::pipeline::ir;
pub use template::pipeline::src::compilation::{
    CompilationJob, CompilationJobKind, CompilationUnit, ComponentCompilationJob,
    HostBindingCompilationJob, HostBindingCompilationUnit, ViewCompilationUnit,
};
pub use template::pipeline::src::phases::{
    pipe_creation::create_pipes, pipe_variadic::create_variadic_pipes, run_pipe_phases,
};
