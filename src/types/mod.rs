//! Type definitions

pub mod api;
pub mod customer;
pub mod report;

pub use api::*;
pub use customer::*;
pub use report::*;
