//! Projection outputs
//!
//! `CalculationResult` is the summary handed to callers; `Projection` adds
//! the per-month series and the lifecycle ledger for charting and auditing.

use serde::{Deserialize, Serialize};

use super::cpf::CpfAccounts;
use super::state_event::LedgerEntry;

/// One simulated month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRecord {
    /// Months since the anchor
    pub index: u32,
    pub year: i16,
    pub month: i8,
    /// Fractional age in years
    pub age: f64,
    pub income: f64,
    pub expenses: f64,
    /// Cumulative contributions so far
    pub contributions: f64,
    pub portfolio_value: f64,
    pub growth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<CpfAccounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annuity_income: Option<f64>,
}

/// Summary of a full projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub future_value: f64,
    pub total_contributions: f64,
    pub investment_growth: f64,
    /// `future_value` in today's money
    pub inflation_adjusted_value: f64,
    pub years_to_retirement: f64,
    pub years_until_depletion: Option<f64>,
    pub depletion_age: Option<f64>,
    pub sustainability_warning: bool,
}

/// Totals at the end of the accumulation phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccumulationSummary {
    pub months: u32,
    pub future_value: f64,
    pub total_contributions: f64,
    pub investment_growth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<CpfAccounts>,
}

/// How the depletion phase ended
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepletionSummary {
    /// Months simulated after retirement
    pub months: u32,
    pub final_value: f64,
    pub years_until_depletion: Option<f64>,
    pub depletion_age: Option<f64>,
}

impl DepletionSummary {
    pub fn depleted(&self) -> bool {
        self.years_until_depletion.is_some()
    }
}

/// A full projection with its month-by-month trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub result: CalculationResult,
    pub accumulation: AccumulationSummary,
    pub depletion: DepletionSummary,
    /// Empty unless the options asked for the series
    pub accumulation_series: Vec<MonthRecord>,
    pub depletion_series: Vec<MonthRecord>,
    pub ledger: Vec<LedgerEntry>,
}
