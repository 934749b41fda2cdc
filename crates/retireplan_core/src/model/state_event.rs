//! Lifecycle ledger
//!
//! Notable one-time moments of a projection are recorded as dated entries.
//! The ledger is append-only and informational: nothing reads it back to
//! drive balances.

use serde::{Deserialize, Serialize};

use super::cpf::{AnnuityPlan, TransitionOutcome};
use crate::date_math::MonthStamp;

/// A ledger entry recording a lifecycle event with its month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub month: MonthStamp,
    /// Months since the anchor
    pub index: u32,
    pub event: StateEvent,
}

impl LedgerEntry {
    pub fn new(month: MonthStamp, index: u32, event: StateEvent) -> Self {
        Self {
            month,
            index,
            event,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum StateEvent {
    /// The special account closed into the retirement account
    CpfTransition(TransitionOutcome),

    /// The annual contribution limit reduced a contribution
    ContributionCapped { requested: f64, credited: f64 },

    /// Annuity payouts began; `premium` left the retirement account
    AnnuityStarted {
        plan: AnnuityPlan,
        premium: f64,
        monthly_payout: f64,
    },

    /// A loan's balance reached zero
    LoanPaidOff { loan: String, payments: u32 },

    /// The accumulation phase ended and withdrawals began
    RetirementStarted { portfolio_value: f64 },

    /// The portfolio could not cover the month's withdrawal
    Depleted {
        required: f64,
        available: f64,
        age: f64,
    },
}
