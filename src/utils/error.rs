use thiserror::Error;

#[derive(Error, Debug)]
pub enum OerebError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No sort method registered under the name '{name}'")]
    UnknownSortHook { name: String },

    #[error("Municipality with fosnr {fosnr} not found")]
    MunicipalityNotFound { fosnr: u32 },

    #[error("Municipality with fosnr {fosnr} is not published")]
    MunicipalityNotPublished { fosnr: u32 },

    #[error("Store read failed for real estate {egrid}: {message}")]
    StoreError { egrid: String, message: String },

    #[error("View service error ({view_service}): {message}")]
    ViewServiceError {
        view_service: String,
        message: String,
    },

    #[error("WMS download from {url} failed: {message}")]
    WmsDownloadError { url: String, message: String },
}

pub type Result<T> = std::result::Result<T, OerebError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Lookup,
    Collaborator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code reported by the command line tool.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl OerebError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OerebError::ConfigError { .. }
            | OerebError::InvalidConfigValueError { .. }
            | OerebError::UnknownSortHook { .. } => ErrorCategory::Configuration,
            OerebError::MunicipalityNotFound { .. }
            | OerebError::MunicipalityNotPublished { .. } => ErrorCategory::Lookup,
            OerebError::HttpError(_)
            | OerebError::IoError(_)
            | OerebError::SerializationError(_)
            | OerebError::StoreError { .. }
            | OerebError::ViewServiceError { .. }
            | OerebError::WmsDownloadError { .. } => ErrorCategory::Collaborator,
        }
    }

    /// Configuration problems stop the process, lookup failures only the request.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Lookup => ErrorSeverity::High,
            ErrorCategory::Collaborator => match self {
                OerebError::HttpError(_) | OerebError::WmsDownloadError { .. } => {
                    ErrorSeverity::Medium
                }
                _ => ErrorSeverity::High,
            },
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            OerebError::ConfigError { .. }
            | OerebError::InvalidConfigValueError { .. } => {
                "Check the configuration file against the documented sections"
            }
            OerebError::UnknownSortHook { .. } => {
                "Use one of the built-in sort methods (type_code, part_in_percent) or remove the setting"
            }
            OerebError::MunicipalityNotFound { .. } => {
                "Add the municipality to the [[municipalities]] section of the configuration"
            }
            OerebError::MunicipalityNotPublished { .. } => {
                "Extracts are only available for published municipalities"
            }
            OerebError::StoreError { .. } | OerebError::IoError(_) => {
                "Make sure the store directory contains the requested real estate"
            }
            OerebError::SerializationError(_) => "Check that the stored extract is valid JSON",
            OerebError::HttpError(_) | OerebError::WmsDownloadError { .. } => {
                "Check that the WMS server is reachable, then retry the request"
            }
            OerebError::ViewServiceError { .. } => {
                "Check the reference WMS URLs of the view service"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Lookup => format!("Extract cannot be created: {}", self),
            ErrorCategory::Collaborator => format!("External service failed: {}", self),
        }
    }
}
