//! Application use cases.

pub mod signup;

pub use signup::*;
