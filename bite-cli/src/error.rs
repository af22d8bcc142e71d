//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File or directory not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Patterns that matched no file
    NoMatchingFiles(Vec<String>),
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::NoMatchingFiles(patterns) => {
                write!(f, "No files found matching: {}", patterns.join(", "))
            }
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("people.csv".to_string());
        assert_eq!(error.to_string(), "File not found: people.csv");
    }

    #[test]
    fn test_invalid_pattern_error_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_no_matching_files_display() {
        let error = CliError::NoMatchingFiles(vec!["out/*.txt".to_string(), "a.csv".to_string()]);
        assert_eq!(
            error.to_string(),
            "No files found matching: out/*.txt, a.csv"
        );
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("unknown field `lines`".to_string());
        assert_eq!(error.to_string(), "Configuration error: unknown field `lines`");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let result: CliResult<()> = Err(CliError::FileNotFound("x".to_string()).into());
        let error = result.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CliError>(),
            Some(CliError::FileNotFound(_))
        ));
    }
}
