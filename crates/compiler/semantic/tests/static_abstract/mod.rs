//! Static abstract interface member tests

pub mod constraints;
pub mod runtime;
pub mod variance;
