//! Import pipeline services

pub mod chunker;
pub mod decoder;
pub mod import_runner;
pub mod price;
pub mod profile;
pub mod template;
pub mod transmitter;
