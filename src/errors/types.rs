//! # Error Types
//!
//! Error taxonomy for the smoke-test suite using `thiserror`. The variants map
//! onto the failure classes a test run can hit: bad configuration, unmet
//! platform preconditions, CLI command failures, admin API failures, probe
//! transport failures, and timeouts.

/// Custom result type for smoke-test operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the smoke-test suite
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration load/parse errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation errors
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// Platform CLI returned a non-zero exit status
    #[error("CLI command `{command}` failed with exit code {exit_code}: {stderr}")]
    Cli { command: String, exit_code: i32, stderr: String },

    /// Admin API call failed or returned an unusable response
    #[error("API error: {message}")]
    Api { message: String, endpoint: Option<String> },

    /// A named resource was absent from an API listing
    #[error("{resource_type} named '{name}' not found")]
    NotFound { resource_type: String, name: String },

    /// A pre-existing org/space is not entitled/assigned as required
    #[error("Precondition failed: {message}")]
    Precondition { message: String },

    /// Probe transport failure (DNS, connect, or incomplete response)
    #[error("Probe error: {message}")]
    Probe {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: String,
    },

    /// Operation exceeded its time budget
    #[error("Operation timed out: {operation} after {duration_ms}ms")]
    Timeout { operation: String, duration_ms: u64 },
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(source) }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    /// Create a CLI failure error
    pub fn cli<C: Into<String>, E: Into<String>>(command: C, exit_code: i32, stderr: E) -> Self {
        Self::Cli { command: command.into(), exit_code, stderr: stderr.into() }
    }

    /// Create an API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api { message: message.into(), endpoint: None }
    }

    /// Create an API error tied to a specific endpoint
    pub fn api_endpoint<S: Into<String>, E: Into<String>>(message: S, endpoint: E) -> Self {
        Self::Api { message: message.into(), endpoint: Some(endpoint.into()) }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, N: Into<String>>(resource_type: R, name: N) -> Self {
        Self::NotFound { resource_type: resource_type.into(), name: name.into() }
    }

    /// Create a precondition failure
    pub fn precondition<S: Into<String>>(message: S) -> Self {
        Self::Precondition { message: message.into() }
    }

    /// Create a probe error without an underlying transport error
    pub fn probe<S: Into<String>>(message: S) -> Self {
        Self::Probe { message: message.into(), source: None }
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(operation: S, duration_ms: u64) -> Self {
        Self::Timeout { operation: operation.into(), duration_ms }
    }

    /// Whether this error represents an unmet precondition rather than a
    /// defect in the run itself
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::Precondition { .. })
    }
}

// Error conversions for common external error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io { source: error, context: "I/O operation failed".to_string() }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization { source: error, context: "JSON serialization failed".to_string() }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_connect() {
            "connection to router could not be established".to_string()
        } else if error.is_timeout() {
            "no complete response before the network timeout".to_string()
        } else {
            "HTTP request failed".to_string()
        };
        Self::Probe { message, source: Some(error) }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string())
                    })
                    .collect();
                format!("{}: {}", field, messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::validation(format!("Validation failed: {}", message))
    }
}
