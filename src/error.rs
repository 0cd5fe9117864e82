//! Error handling for passforge

use thiserror::Error;

/// Main error type for passforge
#[derive(Error, Debug, Clone)]
pub enum PassForgeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Token pool '{pool}' is empty")]
    EmptyPool { pool: String },

    #[error("Could not reach minimum length {min_length} after {attempts} attempts (reached {reached})")]
    InsufficientEntropy {
        min_length: usize,
        reached: usize,
        attempts: usize,
    },

    #[error("Strength engine error: {message}")]
    Classification { message: String },

    #[error("No acceptable password after {attempts} attempts")]
    RetryExhausted { attempts: usize },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Malformed URL '{url}'")]
    MalformedUrl { url: String, suggestion: Option<String> },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        line: Option<usize>,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("CLI error: {message}")]
    Cli { message: String },
}

impl PassForgeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an empty-pool error
    pub fn empty_pool(pool: impl Into<String>) -> Self {
        Self::EmptyPool { pool: pool.into() }
    }

    /// Create an insufficient-entropy error
    pub fn insufficient_entropy(min_length: usize, reached: usize, attempts: usize) -> Self {
        Self::InsufficientEntropy {
            min_length,
            reached,
            attempts,
        }
    }

    /// Create a classification error
    pub fn classification(message: impl Into<String>) -> Self {
        Self::Classification {
            message: message.into(),
        }
    }

    /// Create a retry-exhausted error
    pub fn retry_exhausted(attempts: usize) -> Self {
        Self::RetryExhausted { attempts }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a malformed-URL error
    pub fn malformed_url(url: impl Into<String>, suggestion: Option<String>) -> Self {
        Self::MalformedUrl {
            url: url.into(),
            suggestion,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, line: Option<usize>) -> Self {
        Self::Parse {
            message: message.into(),
            line,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a CLI error
    pub fn cli(message: impl Into<String>) -> Self {
        Self::Cli {
            message: message.into(),
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your file paths and .env settings", message)
            }
            Self::EmptyPool { pool } => {
                format!("❌ Token pool '{}' has no entries\n💡 Check that your dictionary or corpus file is not empty", pool)
            }
            Self::InsufficientEntropy { min_length, reached, attempts } => {
                format!(
                    "❌ Could not build a password of at least {} characters (got {} after {} tries)\n💡 Use a larger word list or lower the minimum length",
                    min_length, reached, attempts
                )
            }
            Self::Classification { message } => {
                format!("❌ Strength engine error: {}", message)
            }
            Self::RetryExhausted { attempts } => {
                format!(
                    "❌ Gave up after {} generation attempts\n💡 Lower the acceptance bar or use a richer word source",
                    attempts
                )
            }
            Self::Network { message, status_code, .. } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!("❌ Network error{}: {}\n💡 Check your internet connection", status, message)
            }
            Self::MalformedUrl { url, suggestion } => match suggestion {
                Some(s) => format!("❌ You must provide the whole URL. Did you mean \"{}\"?", s),
                None => format!("❌ Malformed URL: {}", url),
            },
            Self::Parse { message, line } => {
                let at = line.map_or(String::new(), |l| format!(" at line {}", l));
                format!("❌ Parse error{}: {}\n💡 Check the input file format", at, message)
            }
            Self::Validation { message } => {
                format!("❌ Validation error: {}\n💡 Check your input", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
            Self::Cli { message } => {
                format!("❌ Command error: {}\n💡 Use --help for usage information", message)
            }
        }
    }
}

/// Convert from common error types
impl From<reqwest::Error> for PassForgeError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::network("Request timed out", status_code, url)
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<std::io::Error> for PassForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PassForgeError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::PassForgeError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::PassForgeError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::PassForgeError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::PassForgeError::validation(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PassForgeError::empty_pool("dictionary");
        assert!(err.to_string().contains("dictionary"));

        let err = PassForgeError::retry_exhausted(1000);
        assert!(err.to_string().contains("1000"));
    }

    #[test]
    fn test_malformed_url_suggestion() {
        let err = PassForgeError::malformed_url(
            "genius.com/artist",
            Some("https://genius.com/artist".to_string()),
        );
        assert!(err.user_message().contains("https://genius.com/artist"));
        assert!(err.user_message().contains("Did you mean"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PassForgeError = io.into();
        assert!(matches!(err, PassForgeError::Io { .. }));
    }
}
