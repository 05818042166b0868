//! CLI command implementations

pub mod import;
pub mod template;
pub mod validate;
