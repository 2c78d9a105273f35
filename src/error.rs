//! Error types for the morio CLI.
//!
//! Uses thiserror for derive macros. Every variant is fatal to the command
//! that produced it; absence of a variable or module is never an error and
//! has no variant here.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for morio operations.
#[derive(Error, Debug)]
pub enum MorioError {
    /// User provided invalid arguments or input.
    #[error("{0}")]
    UserError(String),

    /// A variable read, write or removal failed for a reason other than absence.
    #[error("Variable storage failed: {0}")]
    StorageError(String),

    /// A template or the shared layout failed to render or be written.
    #[error("Template rendering failed: {0}")]
    TemplateRenderError(String),

    /// Documentation-mode output of a template is not valid YAML.
    #[error("Template docs could not be parsed: {0}")]
    TemplateParseError(String),

    /// A module area could not be enumerated, or a module rename failed.
    #[error("Module state error: {0}")]
    ModuleStateError(String),

    /// The OS service manager failed or is unsupported.
    #[error("Service control failed: {0}")]
    ServiceError(String),

    /// A collector binary could not be started or exited non-zero.
    #[error("Agent failed: {0}")]
    AgentError(String),
}

impl MorioError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            MorioError::UserError(_) => exit_codes::USER_ERROR,
            MorioError::StorageError(_) => exit_codes::STORAGE_FAILURE,
            MorioError::TemplateRenderError(_) => exit_codes::TEMPLATE_FAILURE,
            MorioError::TemplateParseError(_) => exit_codes::TEMPLATE_FAILURE,
            MorioError::ModuleStateError(_) => exit_codes::MODULE_STATE_FAILURE,
            MorioError::ServiceError(_) => exit_codes::AGENT_FAILURE,
            MorioError::AgentError(_) => exit_codes::AGENT_FAILURE,
        }
    }
}

/// Result type alias for morio operations.
pub type Result<T> = std::result::Result<T, MorioError>;
