//! Pipeline Phases Module
//!
//! Phases rewriting the IR of a compilation job in place.

pub mod pipe_creation;
pub mod pipe_variadic;

use tracing::info_span;

use crate::error::Result;
use crate::template::pipeline::src::compilation::CompilationJob;

/// Run the pipe phases over `job`, in order.
pub fn run_pipe_phases(job: &mut dyn CompilationJob) -> Result<()> {
    {
        let _span = info_span!("phase", name = "pipe_creation").entered();
        pipe_creation::create_pipes(job)?;
    }
    {
        let _span = info_span!("phase", name = "pipe_variadic").entered();
        pipe_variadic::create_variadic_pipes(job);
    }
    Ok(())
}
