use colored::*;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use zdorg_core::error::{Error as CoreError, FormatError};

/// CLI-specific error type with semantic exit codes
#[derive(Debug)]
pub struct CliError {
    /// The main error message
    message: String,

    /// Error category for exit code determination
    category: ErrorCategory,

    /// Additional context information
    context: Vec<(String, String)>,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,

    /// Source error if any
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Error categories that map to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCategory {
    General,
    Misuse,
    Network,
    Filesystem,
    Auth,
}

/// Semantic exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    GeneralError = 1,
    Misuse = 2,
    NetworkError = 3,
    FilesystemError = 4,
    AuthError = 5,
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Extension trait for adding context to errors
pub trait ErrorContext {
    fn with_context(self, key: &str, value: &str) -> Self;
    fn with_suggestion(self, suggestion: &str) -> Self;
    fn with_source(self, source: Box<dyn StdError + Send + Sync>) -> Self;
}

impl CliError {
    fn new(message: &str, category: ErrorCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Create a general error
    pub fn general(message: &str) -> Self {
        Self::new(message, ErrorCategory::General)
    }

    /// Create a command misuse error
    pub fn misuse(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Misuse);
        error
            .suggestions
            .push("Run 'zdorg --help' for usage information".to_string());
        error
    }

    /// Create a network error
    pub fn network(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Network);
        error.suggestions = vec![
            "Check your internet connection".to_string(),
            "Verify Zendesk status at https://status.zendesk.com".to_string(),
            "Try again later".to_string(),
        ];
        error
    }

    /// Create a filesystem error
    pub fn filesystem(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Filesystem);

        if message.contains("not found") || message.contains("No such file") {
            error
                .suggestions
                .push("Check if the file exists".to_string());
            error
                .suggestions
                .push("Verify you have the correct path".to_string());
        } else if message.contains("permission") || message.contains("denied") {
            error.suggestions.push("Check file permissions".to_string());
        }

        error
    }

    /// Create an authentication error
    pub fn auth(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Auth);
        error.suggestions = vec![
            "Check the subdomain and API token".to_string(),
            "Sandbox and production use different credentials; check --environment".to_string(),
        ];
        error
    }

    /// Create an error from an IO error
    pub fn from_io_error(error: io::Error, path: &str) -> Self {
        let message = format!("IO error on '{path}': {error}");
        let mut cli_error = match error.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => Self::filesystem(&message),
            io::ErrorKind::TimedOut => Self::network(&message),
            _ => Self::general(&message),
        };

        cli_error.source = Some(Box::new(error));
        cli_error
            .context
            .push(("path".to_string(), path.to_string()));
        cli_error
    }

    /// Create an error for a core library failure
    fn from_core_error(error: &CoreError, message: &str) -> Self {
        match error {
            CoreError::Validation(_) => Self::misuse(message),
            CoreError::Format(FormatError::Unreadable { path, .. }) => {
                Self::filesystem(message).with_context("path", &path.display().to_string())
            }
            CoreError::Format(FormatError::MissingIdColumn) => Self::filesystem(message)
                .with_suggestion("Name the ID column organization_id, org_id or id"),
            CoreError::Format(_) => Self::filesystem(message),
            CoreError::Auth(_) => Self::auth(message),
            CoreError::Transport(_) => Self::network(message),
            CoreError::Application(_) => Self::general(message),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self.category {
            ErrorCategory::General => ExitCode::GeneralError,
            ErrorCategory::Misuse => ExitCode::Misuse,
            ErrorCategory::Network => ExitCode::NetworkError,
            ErrorCategory::Filesystem => ExitCode::FilesystemError,
            ErrorCategory::Auth => ExitCode::AuthError,
        }
    }

    fn label(&self) -> &'static str {
        match self.category {
            ErrorCategory::General => "Error",
            ErrorCategory::Misuse => "Usage Error",
            ErrorCategory::Network => "Network Error",
            ErrorCategory::Filesystem => "File Error",
            ErrorCategory::Auth => "Authentication Error",
        }
    }

    /// Format the error for user display
    pub fn format_for_user(&self, debug: bool) -> String {
        let mut output = String::new();

        let prefix = match self.category {
            ErrorCategory::Misuse => self.label().yellow(),
            _ => self.label().red(),
        };
        output.push_str(&format!("{}: {}\n", prefix, self.message));

        if !self.context.is_empty() {
            output.push_str("\nContext:\n");
            for (key, value) in &self.context {
                output.push_str(&format!("  {}: {}\n", key.bold(), value));
            }
        }

        // Error chain in debug mode
        if debug && let Some(source) = &self.source {
            output.push_str("\nCaused by:\n");
            let mut current: Option<&dyn StdError> = Some(source.as_ref());
            let mut level = 1;

            while let Some(err) = current {
                output.push_str(&format!("  {level}: {err}\n"));
                current = err.source();
                level += 1;
            }
        }

        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.message)?;

        for (key, value) in &self.context {
            write!(f, " ({key}: {value})")?;
        }

        Ok(())
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl ErrorContext for CliError {
    fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }

    fn with_source(mut self, source: Box<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }
}

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        let message = error.to_string();
        Self::from_core_error(&error, &message).with_source(Box::new(error))
    }
}

/// Convert anyhow errors to CLI errors
///
/// Core library errors keep their category even when wrapped in context.
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        let error = match error.downcast::<CliError>() {
            Ok(cli_error) => return cli_error,
            Err(error) => error,
        };

        let message = format!("{error:#}");
        let cli_error = match error.downcast_ref::<CoreError>() {
            Some(core) => Self::from_core_error(core, &message),
            None => Self::general(&message),
        };
        cli_error.with_source(error.into())
    }
}
