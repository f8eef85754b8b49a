pub mod consts;
pub mod model;

pub use model::{ApiConfig, Config, InstanceType, PathMapping, SubmitConfig};
