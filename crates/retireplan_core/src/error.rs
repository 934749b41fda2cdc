use crate::validation::ValidationErrors;

/// Errors raised when parsing a `YYYY-MM` month
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonthStampError {
    #[error("expected a YYYY-MM month, got {0:?}")]
    Malformed(String),

    #[error("month {0} is outside 1..=12")]
    MonthOutOfRange(i8),

    #[error("year {0} is outside 1..=9999")]
    YearOutOfRange(i16),
}

/// A rate table failed to cover an age.
///
/// The shipped tables are contiguous from age 0 past 120, so this only
/// surfaces when a table has been constructed incorrectly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RateTableError {
    #[error("no {table} bracket covers age {age}")]
    NoBracket { table: &'static str, age: u32 },
}

/// Record-level conversion failures when loading input documents
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("expense {name:?} mixes calendar-date and age bounds")]
    MixedActivationWindow { name: String },
}

/// Errors returned by the top-level projection entry points
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculationError {
    #[error("invalid input: {0}")]
    Invalid(ValidationErrors),

    #[error(transparent)]
    RateTable(#[from] RateTableError),
}

impl From<ValidationErrors> for CalculationError {
    fn from(errors: ValidationErrors) -> Self {
        CalculationError::Invalid(errors)
    }
}
