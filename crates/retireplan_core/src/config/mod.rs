//! Projection configuration
//!
//! `ProjectionOptions` carries the run-level knobs that are not part of a
//! person's `UserData`: the anchor month that pins month index 0, the cap on
//! the depletion search and whether per-month series are kept.
//!
//! # Builder DSL
//!
//! `UserDataBuilder` assembles a `UserData` fluently:
//!
//! ```ignore
//! use retireplan_core::config::UserDataBuilder;
//! use retireplan_core::model::{IncomeStream, RetirementExpense, WithdrawalStrategy};
//!
//! let data = UserDataBuilder::new()
//!     .ages(35, 62)
//!     .savings(120_000.0)
//!     .expected_return(5.5)
//!     .inflation(2.5)
//!     .income(IncomeStream::monthly("Salary", 6_500.0, start).cpf_eligible())
//!     .expense(RetirementExpense::new("Living", 3_000.0).inflating(2.5))
//!     .withdrawal(WithdrawalStrategy::Fixed { monthly_amount: 3_500.0 })
//!     .cpf_enabled()
//!     .build();
//! ```

use serde::{Deserialize, Serialize};

use crate::date_math::MonthStamp;

pub mod builder;

pub use builder::UserDataBuilder;

fn default_max_depletion_months() -> u32 {
    1_200
}

fn default_true() -> bool {
    true
}

/// Run-level settings for a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionOptions {
    /// Calendar month of simulation month 0
    pub anchor: MonthStamp,
    /// Upper bound on the months simulated after retirement
    #[serde(default = "default_max_depletion_months")]
    pub max_depletion_months: u32,
    /// Keep the month-by-month records in the projection output
    #[serde(default = "default_true")]
    pub record_series: bool,
}

/// Anchored at January 2025, the month the bundled rate tables take effect.
impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            anchor: MonthStamp::from_date(jiff::civil::date(2025, 1, 1)),
            max_depletion_months: default_max_depletion_months(),
            record_series: true,
        }
    }
}

impl ProjectionOptions {
    /// Default options pinned to `anchor`
    #[must_use]
    pub fn anchored(anchor: MonthStamp) -> Self {
        Self {
            anchor,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: MonthStamp) -> Self {
        self.anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_max_depletion_months(mut self, months: u32) -> Self {
        self.max_depletion_months = months;
        self
    }

    /// Keep (`true`) or drop the per-month series
    #[must_use]
    pub fn with_series(mut self, record: bool) -> Self {
        self.record_series = record;
        self
    }
}
