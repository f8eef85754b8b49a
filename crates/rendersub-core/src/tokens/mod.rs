//! Tokens module - Conditional path-template expansion
//!
//! Expands output-path templates such as `images/<Layer>/shot[_<RenderPass>].exr`
//! against a [`TokenMap`] of known values.
//!
//! ## Syntax
//!
//! - Placeholders: `<Name>`, where `Name` is one or more ASCII letters
//! - Conditional groups: `[...]`, single level, expanded only when every
//!   placeholder inside resolves
//! - Anything else is literal text, including stray `[`, `]`, `<` and `>`
//!
//! ## Resolution
//!
//! - Known value: inserted with `:` rewritten to `_`
//! - Absent marker (name known, no value): rendered back as `<Name>`
//! - Unknown name: empty, or `<Name>` in leave-unmatched mode
//!
//! ```rust
//! use rendersub_core::tokens::{expand, TokenMap};
//!
//! let tokens = TokenMap::new().with("RenderPass", "Diffuse");
//! assert_eq!(expand("filename[_<RenderPass>].jpg", &tokens, false), "filename_Diffuse.jpg");
//! assert_eq!(expand("filename[_<RenderPass>].jpg", &TokenMap::new(), false), "filename.jpg");
//! ```
//!
//! Expansion never fails. Only building a [`TokenMap`] from a shell-style
//! `key=value` string can return an error.

pub mod error;
pub mod expand;
pub mod map;
mod split;
mod words;

pub use error::TokenMapError;
pub use expand::{expand, TokenExpander};
pub use map::{Lookup, TokenMap};

#[cfg(test)]
mod tests;
