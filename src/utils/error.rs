use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid date range {start} to {end}: {reason}")]
    InvalidRangeError {
        start: NaiveDate,
        end: NaiveDate,
        reason: String,
    },

    #[error("Invalid daily rate {rate}: {reason}")]
    InvalidRateError { rate: Decimal, reason: String },

    #[error("Car {car_id} not found")]
    CarNotFound { car_id: i64 },

    #[error("Not permitted: {reason}")]
    Forbidden { reason: String },

    #[error("Listing store error: {message}")]
    StoreError { message: String },

    #[error("Reservation sink error: {message}")]
    SinkError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Authorization,
    NotFound,
    External,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn invalid_range(start: NaiveDate, end: NaiveDate, reason: impl Into<String>) -> Self {
        Self::InvalidRangeError {
            start,
            end,
            reason: reason.into(),
        }
    }

    pub fn invalid_rate(rate: Decimal, reason: impl Into<String>) -> Self {
        Self::InvalidRateError {
            rate,
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRangeError { .. } | Self::InvalidRateError { .. } => {
                ErrorCategory::Validation
            }
            Self::Forbidden { .. } => ErrorCategory::Authorization,
            Self::CarNotFound { .. } => ErrorCategory::NotFound,
            Self::StoreError { .. }
            | Self::SinkError { .. }
            | Self::IoError(_)
            | Self::SerializationError(_) => ErrorCategory::External,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Authorization => ErrorSeverity::Medium,
            ErrorCategory::External => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Only failures coming from the store or the sink are worth retrying;
    /// the caller owns the backoff policy.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::StoreError { .. } | Self::SinkError { .. } | Self::IoError(_)
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidRangeError { .. } => {
                "Pick a return date that is at least one day after the pick-up date"
            }
            Self::InvalidRateError { .. } => {
                "Set a positive daily rate expressed in the currency's smallest unit"
            }
            Self::CarNotFound { .. } => "Refresh the listing; the car may have been removed",
            Self::Forbidden { .. } => "Sign in with a renter account that does not own this car",
            Self::StoreError { .. } | Self::SinkError { .. } | Self::IoError(_) => {
                "Check connectivity to the backend and try again"
            }
            Self::SerializationError(_) => "Inspect the payload returned by the backend",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the configuration file and restart",
        }
    }

    /// Short message suitable for an inline form hint.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidRangeError { .. } => "The selected dates are not a valid rental period".to_string(),
            Self::InvalidRateError { .. } => "This car does not have a valid daily rate".to_string(),
            Self::CarNotFound { car_id } => format!("Car #{} is no longer listed", car_id),
            Self::Forbidden { reason } => format!("You cannot book this car: {}", reason),
            Self::StoreError { .. } | Self::SinkError { .. } | Self::IoError(_) => {
                "The booking service is unavailable right now".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_low_severity_and_not_retryable() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let err = BookingError::invalid_range(day, day, "zero-length");
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(!err.is_retryable());

        let err = BookingError::invalid_rate(Decimal::ZERO, "must be positive");
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.is_retryable());
    }

    #[test]
    fn store_errors_are_retryable() {
        let err = BookingError::StoreError {
            message: "timeout".into(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(
            err.user_friendly_message(),
            "The booking service is unavailable right now"
        );
    }

    #[test]
    fn display_includes_range() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let err = BookingError::invalid_range(start, end, "end before start");
        assert_eq!(
            err.to_string(),
            "Invalid date range 2024-06-05 to 2024-06-01: end before start"
        );
    }
}
