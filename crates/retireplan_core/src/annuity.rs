//! Lifetime annuity payout estimation
//!
//! A retirement-account balance is converted to a monthly payout by
//! pro-rating it against the retirement-sum tier it falls into, using the
//! midpoint of that tier's published payout range.

use crate::model::{AnnuityPlan, PayoutRange, RateTables};
use crate::money::round_money;

/// The payout range used to price `balance`.
///
/// The highest tier not above the balance; the lowest tier when the balance
/// is below every tier.
fn reference_range(tables: &RateTables, balance: f64) -> &PayoutRange {
    let ranges = &tables.annuity.payout_ranges;
    ranges
        .iter()
        .rev()
        .find(|range| balance >= tables.retirement_sum(range.tier))
        .unwrap_or(&ranges[0])
}

/// Estimated level monthly payout for `balance` starting at `payout_age`.
///
/// Starting at the deferred payout age (or later) earns the deferment bonus.
/// The plan multiplier shapes the initial payout.
pub fn estimate_monthly_payout(
    tables: &RateTables,
    balance: f64,
    plan: AnnuityPlan,
    payout_age: u32,
) -> f64 {
    if balance <= 0.0 {
        return 0.0;
    }
    let range = reference_range(tables, balance);
    let reference_sum = tables.retirement_sum(range.tier);
    let mut payout = round_money(balance / reference_sum * range.average());

    if payout_age >= tables.annuity.deferred_payout_age {
        payout = round_money(payout * tables.annuity.deferment_bonus);
    }

    round_money(payout * tables.plan_multiplier(plan))
}

/// Payout in the given year of the annuity (0 = first year).
///
/// Only the escalating plan grows; every other plan pays `initial_payout` for
/// life.
pub fn payout_for_year(
    tables: &RateTables,
    initial_payout: f64,
    years_since_start: u32,
    plan: AnnuityPlan,
) -> f64 {
    match plan {
        AnnuityPlan::Escalating if years_since_start > 0 => round_money(
            initial_payout * (1.0 + tables.annuity.escalation_rate).powi(years_since_start as i32),
        ),
        _ => initial_payout,
    }
}

/// An annuity that has started paying
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveAnnuity {
    pub plan: AnnuityPlan,
    pub initial_payout: f64,
    /// Simulation month of the first payout
    pub start_index: u32,
}

impl ActiveAnnuity {
    /// Payout in simulation month `index`
    pub fn payout_at(&self, tables: &RateTables, index: u32) -> f64 {
        if index < self.start_index {
            return 0.0;
        }
        let years = (index - self.start_index) / 12;
        payout_for_year(tables, self.initial_payout, years, self.plan)
    }
}
