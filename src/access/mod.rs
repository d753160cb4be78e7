//! Access decisions against a compiled table.
//!
//! The evaluator never errors: an unknown path, a method that is not
//! granted, or an item id outside the granted set all resolve to a deny.

pub mod evaluator;

pub use evaluator::{evaluate, has_access, Decision};
