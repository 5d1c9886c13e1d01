#![forbid(unsafe_code)]

pub mod common;
pub mod config;
pub mod debug_data;
pub mod origin;
pub mod outcome;
pub mod report;

pub use common::{ContractViolation, SchemaVersion, SourceId, UnixTimeMs, Validate};
