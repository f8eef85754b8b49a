use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RendersubError {
    // Config errors
    #[error("CONFIG_NOT_FOUND: no rendersub.toml at '{path}'")]
    ConfigNotFound { path: PathBuf },

    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Scene errors
    #[error("SCENE_NOT_SAVED: please save your scene before launching a job")]
    SceneNotSaved,

    #[error("SCENE_PARSE_ERROR: failed to read scene snapshot '{path}': {reason}")]
    SceneParseError { path: PathBuf, reason: String },

    #[error("SCENE_QUERY_FAILED: {0}")]
    SceneQueryFailed(String),

    #[error("RENDER_GLOBALS_UNAVAILABLE: please open the render globals before submitting ({renderer})")]
    RenderGlobalsUnavailable { renderer: String },

    // Form errors
    #[error("FIELD_INVALID: {field}: {reason}")]
    FieldInvalid { field: String, reason: String },

    #[error("UNKNOWN_FIELD: '{0}' is not a submit form field")]
    UnknownField(String),

    #[error("UNKNOWN_RENDERER: '{0}'")]
    UnknownRenderer(String),

    // Submission errors
    #[error("NO_LAYERS_SELECTED: please select layer(s) to render")]
    NoLayersSelected,

    #[error("MISSING_CREDENTIALS: please enter a username and password")]
    MissingCredentials,

    #[error("AUTHENTICATION_FAILED: username authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("SERVICE_ERROR: {0}")]
    ServiceError(String),

    #[error("SPOOL_WRITE_ERROR: failed to write job descriptor: {0}")]
    SpoolWriteError(String),

    // Token errors
    #[error("TOKEN_MAP_INVALID: {0}")]
    TokenMap(#[from] crate::tokens::TokenMapError),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for RendersubError {
    fn from(err: serde_json::Error) -> Self {
        RendersubError::Generic(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, RendersubError>;
