//! Domain error types.

use crate::domain::calendar::TimeUnit;

/// Top-level error type for timetraveler.
#[derive(Debug, thiserror::Error)]
pub enum TravelerError {
    /// The traveler's configuration failed validation. `reasons` holds one
    /// message per violated rule, in validation order.
    #[error("Invalid TimeTraveler: {}", .reasons.join(", "))]
    InvalidTraveler { reasons: Vec<String> },

    #[error("unsupported time unit: {name}")]
    UnsupportedUnit { name: String },

    #[error("timestamp out of range after shifting {amount} {unit}")]
    TimestampOutOfRange { amount: i64, unit: TimeUnit },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TravelerError> for std::process::ExitCode {
    fn from(err: &TravelerError) -> Self {
        let code: u8 = match err {
            TravelerError::Io(_) | TravelerError::Csv(_) => 1,
            TravelerError::ConfigParse { .. } => 2,
            TravelerError::InvalidTraveler { .. } => 3,
            TravelerError::UnsupportedUnit { .. }
            | TravelerError::TimestampOutOfRange { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
