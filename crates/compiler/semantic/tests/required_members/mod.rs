//! Required member tests

pub mod constructors;
pub mod declarations;
pub mod inheritance;
