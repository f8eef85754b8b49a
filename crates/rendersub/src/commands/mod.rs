//! CLI command implementations

pub mod expand;
pub mod files;
pub mod form;
pub mod info;
pub mod paths;
pub mod submit;
