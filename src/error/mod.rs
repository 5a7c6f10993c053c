use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for statmerge
#[derive(Error, Debug)]
pub enum StatMergeError {
    #[error("[E{code:04}] Configuration error: {}", .violations.join("; "))]
    Configuration { code: u16, violations: Vec<String> },

    #[error("[E{code:04}] No input files matching '{pattern}' in {}", .dir.display())]
    EmptyInput {
        code: u16,
        dir: PathBuf,
        pattern: String,
    },

    #[error("[E{code:04}] Failed to load schema source {}: {message}", .path.display())]
    SchemaLoad {
        code: u16,
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Failed to merge artifact {}: {message}", .path.display())]
    ArtifactMerge {
        code: u16,
        path: PathBuf,
        message: String,
    },

    #[error("[E{code:04}] Failed to write {}: {message}", .path.display())]
    OutputWrite {
        code: u16,
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Input does not exist: {}", .path.display())]
    InputMissing { code: u16, path: PathBuf },

    #[error("[E{code:04}] {message}")]
    Other { code: u16, message: String },
}

impl StatMergeError {
    /// Create a configuration error carrying every violated condition
    pub fn configuration(violations: Vec<String>) -> Self {
        Self::Configuration {
            code: ErrorCode::CONFIG_PRECONDITIONS_FAILED,
            violations,
        }
    }

    /// Create a configuration error with specific code and a single message
    pub fn configuration_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Configuration {
            code,
            violations: vec![message.into()],
        }
    }

    /// Create an empty input error
    pub fn empty_input(dir: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self::EmptyInput {
            code: ErrorCode::EMPTY_INPUT_NO_MATCH,
            dir: dir.into(),
            pattern: pattern.into(),
        }
    }

    /// Create a schema load error with specific code
    pub fn schema_load(code: u16, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SchemaLoad {
            code,
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a per-artifact merge error with specific code
    pub fn artifact_merge(
        code: u16,
        path: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::ArtifactMerge {
            code,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an output write error with specific code
    pub fn output_write(code: u16, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::OutputWrite {
            code,
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a missing input error
    pub fn input_missing(path: impl Into<PathBuf>) -> Self {
        Self::InputMissing {
            code: ErrorCode::INPUT_MISSING_FILE,
            path: path.into(),
        }
    }

    /// Create a generic other error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            code: ErrorCode::OTHER_GENERIC,
            message: message.into(),
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::SchemaLoad { source: src, .. } | Self::OutputWrite { source: src, .. } => {
                *src = Some(source.into());
            }
            _ => {}
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::SchemaLoad { message, .. }
            | Self::ArtifactMerge { message, .. }
            | Self::OutputWrite { message, .. }
            | Self::Other { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
            Self::Configuration { violations, .. } => violations.push(context.to_string()),
            Self::EmptyInput { .. } | Self::InputMissing { .. } => {}
        }
        self
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration { .. } => 2,
            Self::EmptyInput { .. } => 3,
            Self::SchemaLoad { .. } => 4,
            Self::OutputWrite { .. } => 5,
            Self::InputMissing { .. } => 6,
            Self::ArtifactMerge { .. } | Self::Other { .. } => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Configuration { code, .. }
            | Self::EmptyInput { code, .. }
            | Self::SchemaLoad { code, .. }
            | Self::ArtifactMerge { code, .. }
            | Self::OutputWrite { code, .. }
            | Self::InputMissing { code, .. }
            | Self::Other { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration { violations, .. } => {
                let mut msg = String::from("Incorrect parameters:");
                for violation in violations {
                    msg.push_str(&format!("\n  - {}", violation));
                }
                msg
            }
            Self::EmptyInput { dir, pattern, .. } => format!(
                "Empty input directory. No {} files in {}",
                pattern,
                dir.display()
            ),
            Self::SchemaLoad { path, message, .. } => format!(
                "Cannot read the first artifact {} ({}); nothing was merged",
                path.display(),
                message
            ),
            Self::ArtifactMerge { path, message, .. } => {
                format!("Skipped artifact {}: {}", path.display(), message)
            }
            Self::OutputWrite { path, message, .. } => {
                format!("Cannot write {}: {}", path.display(), message)
            }
            Self::InputMissing { path, .. } => {
                format!("Input file does not exist: {}", path.display())
            }
            Self::Other { message, .. } => message.clone(),
        }
    }

    /// Get a developer-friendly error message with the source chain
    pub fn developer_message(&self) -> String {
        let mut msg = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            msg.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        msg
    }

    /// Check if this error is absorbed by the merge loop instead of aborting
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ArtifactMerge { .. })
    }
}

/// Type alias for Results using StatMergeError
pub type Result<T> = std::result::Result<T, StatMergeError>;
