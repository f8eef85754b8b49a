// Core modules
pub mod config;
pub mod error;
pub mod job;
pub mod output;
pub mod renderer;
pub mod scene;
pub mod submit;
pub mod tokens;

// Re-export commonly used types
pub use error::{RendersubError, Result};
pub use renderer::Renderer;
