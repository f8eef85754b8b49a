//! Job description: the submit form and the parameters it produces

pub mod form;
pub mod frames;
pub mod params;

pub use form::{Field, FieldKind, FieldValue, FormDefaults, SubmitForm};
pub use frames::FrameRange;
pub use params::RenderParams;
