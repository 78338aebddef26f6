//! CLI command implementations

pub mod catalog;
pub mod json_output;
pub mod serve;
pub mod tone;
