//! Template Module

pub mod pipeline;
