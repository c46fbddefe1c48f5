use thiserror::Error;

/// Main error type for the stepwatch crate.
///
/// Two classes share this enum: invalid-usage faults (state-machine misuse,
/// non-recoverable within the current operation) and codec validation errors
/// (recoverable, returned to the caller with the offending input).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StopwatchError {
    /// State-machine misuse: starting while running, stepping or stopping
    /// while idle. Fault class, see [`StopwatchError::is_fault`].
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Codec vocabulary exceeds the wire format's index space
    #[error("only up to {max} labels supported, got {count}")]
    TooManyLabels { count: usize, max: usize },

    /// A step's label is absent from the encode vocabulary
    #[error("label '{label}' not found in encode label list")]
    UnknownLabel { label: String },

    /// A step's duration does not fit in the 26-bit microsecond field
    #[error("label '{label}' duration of {micros}us exceeds the max supported duration {max}us")]
    DurationOverflow {
        label: String,
        micros: i64,
        max: u32,
    },

    /// A decoded word's index has no entry in the supplied vocabulary
    #[error("label for index {index} not found")]
    UnknownIndex { index: u32 },

    /// A byte stream's length is not a whole number of 32-bit words
    #[error("encoded stream length {len} is not a multiple of 4")]
    TruncatedStream { len: usize },

    /// IO errors from report writing
    #[error("io error: {0}")]
    Io(String),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StopwatchError {
    /// Create an invalid-state fault with a description of the misuse
    pub fn invalid_state(message: &str) -> Self {
        StopwatchError::InvalidState(message.to_string())
    }

    /// True for invalid-usage faults, false for recoverable errors.
    ///
    /// Faults abort the current operation; they are not retryable.
    pub fn is_fault(&self) -> bool {
        matches!(self, StopwatchError::InvalidState(_))
    }
}

impl From<std::io::Error> for StopwatchError {
    fn from(err: std::io::Error) -> Self {
        StopwatchError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StopwatchError {
    fn from(err: serde_json::Error) -> Self {
        StopwatchError::Serialization(err.to_string())
    }
}

/// Result type for stepwatch operations
pub type StopwatchResult<T> = Result<T, StopwatchError>;
