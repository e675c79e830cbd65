//! Error and result definitions shared by all pagedec-* crates.

pub mod error;
pub mod macros;
pub mod result;

pub use result::Result;
