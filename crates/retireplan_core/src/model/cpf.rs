//! Mandatory-savings (CPF) account types
//!
//! Four balances: ordinary, special, medisave and retirement. The special
//! account closes at the transition age and the retirement account only
//! exists from then on.

use serde::{Deserialize, Serialize};

/// Balances of the four savings accounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CpfAccounts {
    pub ordinary: f64,
    pub special: f64,
    pub medisave: f64,
    pub retirement: f64,
}

impl CpfAccounts {
    pub fn total(&self) -> f64 {
        self.ordinary + self.special + self.medisave + self.retirement
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.ordinary, self.special, self.medisave, self.retirement]
    }

    pub fn from_array([ordinary, special, medisave, retirement]: [f64; 4]) -> Self {
        Self {
            ordinary,
            special,
            medisave,
            retirement,
        }
    }
}

/// Target funded into the retirement account at the transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RetirementSumTier {
    Basic,
    #[default]
    Full,
    Enhanced,
}

/// Payout shape of the lifetime annuity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnnuityPlan {
    /// Level payouts for life
    #[default]
    Standard,
    /// Higher level payouts for life
    Basic,
    /// Lower initial payouts that rise every year
    Escalating,
}

/// User configuration of the mandatory-savings scheme
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpfConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub balances: CpfAccounts,
    #[serde(default)]
    pub retirement_sum: RetirementSumTier,
    #[serde(default)]
    pub annuity_plan: AnnuityPlan,
    /// Age payouts begin; `None` uses the default payout age
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_age: Option<u32>,
}

/// One month's contribution, after the wage ceiling and annual limit
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSplit {
    pub employee: f64,
    pub employer: f64,
    pub total: f64,
    /// The annual limit reduced this month's contribution
    pub capped: bool,
}

/// Interest credited in one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestBreakdown {
    pub base: CpfAccounts,
    pub extra: CpfAccounts,
}

impl InterestBreakdown {
    pub fn total(&self) -> f64 {
        self.base.total() + self.extra.total()
    }
}

/// What happened at the age-55 account transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionOutcome {
    pub target: f64,
    pub from_special: f64,
    pub from_ordinary: f64,
    pub before: CpfAccounts,
    pub after: CpfAccounts,
    /// Informational; does not change balances
    pub withdrawable: f64,
}
