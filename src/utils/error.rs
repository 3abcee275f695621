use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Seminar offering {id} not found")]
    NotFound { id: u32 },

    #[error("Booking form incomplete: {message}")]
    ValidationIncomplete { message: String, notice_key: String },

    #[error("Record selector out of range: {selector}")]
    OutOfRange { selector: String },

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Booking already submitted; edit the form to submit again")]
    AlreadySubmitted,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Contact endpoint rejected the message with status {status}")]
    RemoteRejected { status: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    UserInput,
    Programming,
    Configuration,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn validation(message: impl Into<String>, notice_key: impl Into<String>) -> Self {
        Self::ValidationIncomplete {
            message: message.into(),
            notice_key: notice_key.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::Lookup,
            Self::ValidationIncomplete { .. }
            | Self::SubmissionInProgress
            | Self::AlreadySubmitted => ErrorCategory::UserInput,
            Self::OutOfRange { .. } => ErrorCategory::Programming,
            Self::HttpError(_) | Self::RemoteRejected { .. } => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlError(_) => ErrorCategory::Configuration,
            Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup | ErrorCategory::UserInput => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Programming | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Message key for the page shell, when the error has a user-facing notice.
    pub fn notice_key(&self) -> Option<&str> {
        match self {
            Self::NotFound { .. } => Some("checkout.notFound"),
            Self::ValidationIncomplete { notice_key, .. } => Some(notice_key.as_str()),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { id } => format!("No seminar with id {} is offered", id),
            Self::ValidationIncomplete { message, .. } => {
                format!("The booking form is not complete: {}", message)
            }
            Self::OutOfRange { .. } => "Internal error while editing the form".to_string(),
            Self::SubmissionInProgress => "Your message is still being sent".to_string(),
            Self::AlreadySubmitted => "This booking has already been submitted".to_string(),
            Self::HttpError(_) | Self::RemoteRejected { .. } => {
                "The message could not be delivered".to_string()
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlError(_) => format!("Configuration problem: {}", self),
            Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                format!("System error: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Run `formation-booking list` to see available seminars",
            Self::ValidationIncomplete { .. } => {
                "Fill in every required field and accept the terms and conditions"
            }
            Self::OutOfRange { .. } => "Report this as a bug",
            Self::SubmissionInProgress => "Wait for the current submission to finish",
            Self::AlreadySubmitted => "Change the booking details before submitting again",
            Self::HttpError(_) | Self::RemoteRejected { .. } => {
                "Check the contact endpoint and try again"
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlError(_) => "Check the configuration file",
            Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                "Check file paths and permissions"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
