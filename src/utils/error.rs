use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Encoding error in {path}: {message}")]
    EncodingError { path: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl PatchError {
    /// Attaches the path to an I/O failure, splitting out the kinds callers care about.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            ErrorKind::NotFound => PatchError::FileNotFound { path },
            ErrorKind::PermissionDenied => PatchError::PermissionDenied { path },
            ErrorKind::InvalidData => PatchError::EncodingError {
                path,
                message: err.to_string(),
            },
            _ => PatchError::IoError(err),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PatchError::FileNotFound { .. } => {
                "Run from the project root or pass --path to the file to patch"
            }
            PatchError::PermissionDenied { .. } => "Check that the file is writable by this user",
            PatchError::EncodingError { .. } => "Convert the file to UTF-8 before patching",
            PatchError::IoError(_) => "Check disk space and retry",
            PatchError::TomlError(_)
            | PatchError::ConfigError { .. }
            | PatchError::MissingConfigError { .. }
            | PatchError::InvalidConfigValueError { .. } => "Fix the configuration file and retry",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            PatchError::FileNotFound { .. }
            | PatchError::PermissionDenied { .. }
            | PatchError::IoError(_) => 1,
            PatchError::EncodingError { .. } => 3,
            PatchError::TomlError(_)
            | PatchError::ConfigError { .. }
            | PatchError::MissingConfigError { .. }
            | PatchError::InvalidConfigValueError { .. } => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, PatchError>;
