//! Template Pipeline IR
//!
//! Operations, expressions and the linked operation lists phases rewrite.

pub mod enums;
pub mod expression;
pub mod handle;
pub mod operations;
pub mod ops;
pub mod traits;

pub use enums::*;
pub use expression::*;
pub use handle::*;
pub use operations::*;
pub use ops::*;
pub use traits::*;
