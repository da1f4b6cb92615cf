//! Template Pipeline Module
//!
//! The IR and the phases that lower a template into instruction lists.

pub mod ir;
pub mod src;
