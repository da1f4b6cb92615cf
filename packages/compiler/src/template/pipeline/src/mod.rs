//! Pipeline Source Module
//!
//! Compilation jobs and the phases which run over them.

pub mod compilation;
pub mod phases;

pub use compilation::*;
pub use phases::run_pipe_phases;
