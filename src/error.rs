use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Calendar source error: {0}")]
    #[diagnostic(code(calendar_reminder::calendar_source))]
    CalendarSource(String),

    #[error("Parse error: {0}")]
    #[diagnostic(code(calendar_reminder::parse))]
    Parse(String),

    #[error("Notification error: {0}")]
    #[diagnostic(code(calendar_reminder::notify))]
    Notify(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(calendar_reminder::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(calendar_reminder::io))]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    #[diagnostic(code(calendar_reminder::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type ReminderResult<T> = Result<T, Error>;

/// Helper to create calendar source errors
pub fn calendar_source_error(message: &str) -> Error {
    Error::CalendarSource(message.to_string())
}

/// Helper to create parse errors
pub fn parse_error(message: &str) -> Error {
    Error::Parse(message.to_string())
}

/// Helper to create notification errors
pub fn notify_error(message: &str) -> Error {
    Error::Notify(message.to_string())
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}
