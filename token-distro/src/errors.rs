use core::fmt;

/// Error types for token distribution parsing and construction
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum DistroError {
    // Schedule errors (1000-1099)
    InvalidSchedule = 1000,

    // Amount errors (1100-1199)
    InvalidAmount = 1100,
    NegativeAmount = 1101,

    // Time errors (1200-1299)
    InvalidTimestamp = 1200,

    // Stream errors (1300-1399)
    UnknownStreamType = 1300,

    // Payload errors (1400-1499)
    MalformedPayload = 1400,
}

impl DistroError {
    /// Stable numeric code, grouped by category.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Whether the error was caused by the schedule payload itself
    /// (as opposed to a registry or stream lookup).
    pub fn is_schedule_error(self) -> bool {
        matches!(
            self,
            DistroError::InvalidSchedule
                | DistroError::InvalidAmount
                | DistroError::NegativeAmount
                | DistroError::InvalidTimestamp
        )
    }

    fn message(self) -> &'static str {
        match self {
            DistroError::InvalidSchedule => "end time is before start time",
            DistroError::InvalidAmount => "amount is not a non-negative integer",
            DistroError::NegativeAmount => "amount must not be negative",
            DistroError::InvalidTimestamp => "timestamp is neither ISO-8601 nor epoch milliseconds",
            DistroError::UnknownStreamType => "unknown stream type",
            DistroError::MalformedPayload => "malformed distribution payload",
        }
    }
}

impl fmt::Display for DistroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message(), self.code())
    }
}

impl std::error::Error for DistroError {}

impl From<serde_json::Error> for DistroError {
    fn from(err: serde_json::Error) -> Self {
        log::debug!("payload rejected: {err}");
        DistroError::MalformedPayload
    }
}
