//! Integration tests for the retirement projection engine
//!
//! Tests are organized by topic:
//! - `rate_tables` - Bracket coverage and allocation shares
//! - `cash_flows` - Frequency conversion, activation windows and inflation
//! - `loans` - Amortization schedules and extra payments
//! - `cpf` - Contributions, interest and the age-55 transition
//! - `annuity` - Payout estimation and escalation
//! - `accumulation` - The working-years loop
//! - `depletion` - The retirement loop and depletion timing
//! - `validation` - Input validation and fail-fast behavior
//! - `builder_dsl` - Builder DSL and scenario comparison

mod accumulation;
mod depletion;
mod loans;

use crate::date_math::MonthStamp;

/// Shorthand for a month in tests
pub(crate) fn ms(year: i16, month: i8) -> MonthStamp {
    MonthStamp::new(year, month).unwrap()
}
