//! Reusable gadgets.
//!
//! - Arithmetic (mul with bound inputs, linear operations, the x^7 S-box)
//! - Boolean allocation
//! - Conditional selection
//! - Bit decomposition and range checks

pub mod arithmetic;
pub mod boolean;
pub mod range;
pub mod select;

pub use arithmetic::*;
pub use boolean::*;
pub use range::*;
pub use select::*;
