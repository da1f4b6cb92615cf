//! Pipeline IR Module

mod src;

pub use src::*;
