//! Age-bracketed rate tables for the mandatory-savings scheme
//!
//! Contribution rates, account allocation shares, interest rates, wage
//! ceilings, retirement-sum targets and annuity payout ranges. The tables are
//! process-wide constant data; engines borrow them and never mutate them.

use serde::Serialize;

use crate::error::RateTableError;

use super::cpf::{AnnuityPlan, RetirementSumTier};

/// Employer and employee contribution rates for `[min_age, max_age)`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ContributionBracket {
    pub min_age: u32,
    pub max_age: u32,
    pub employer_rate: f64,
    pub employee_rate: f64,
}

/// Share of a total contribution credited to each account for `[min_age, max_age)`
///
/// The four shares of a bracket sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AllocationBracket {
    pub min_age: u32,
    pub max_age: u32,
    pub ordinary: f64,
    pub special: f64,
    pub medisave: f64,
    pub retirement: f64,
}

impl AllocationBracket {
    pub fn total_share(&self) -> f64 {
        self.ordinary + self.special + self.medisave + self.retirement
    }
}

/// Annual base interest rate per account
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BaseInterestRates {
    pub ordinary: f64,
    pub special: f64,
    pub medisave: f64,
    pub retirement: f64,
}

/// Bonus ("extra") interest paid on top of the base rates
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExtraInterestRules {
    /// Below the transition age: rate paid on the first `pre_transition_cap`
    pub pre_transition_rate: f64,
    pub pre_transition_cap: f64,
    /// Below the transition age: at most this much of the ordinary account counts
    pub pre_transition_ordinary_cap: f64,
    /// From the transition age: first tier on the combined balance
    pub first_tier_rate: f64,
    pub first_tier_cap: f64,
    /// From the transition age: second tier on the next slice
    pub second_tier_rate: f64,
    pub second_tier_cap: f64,
}

/// Published monthly payout range for a retirement-sum tier
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PayoutRange {
    pub tier: RetirementSumTier,
    pub min_monthly: f64,
    pub max_monthly: f64,
}

impl PayoutRange {
    pub fn average(&self) -> f64 {
        (self.min_monthly + self.max_monthly) / 2.0
    }
}

/// Payout shaping for the lifetime annuity
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnnuityRules {
    pub default_payout_age: u32,
    pub deferred_payout_age: u32,
    pub deferment_bonus: f64,
    pub standard_multiplier: f64,
    pub basic_multiplier: f64,
    pub escalating_multiplier: f64,
    /// Yearly compounding for the escalating plan
    pub escalation_rate: f64,
    /// Ascending by tier
    pub payout_ranges: [PayoutRange; 3],
}

/// The complete set of scheme parameters
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RateTables {
    pub contribution_brackets: &'static [ContributionBracket],
    pub allocation_brackets: &'static [AllocationBracket],
    pub base_interest: BaseInterestRates,
    pub extra_interest: ExtraInterestRules,
    pub monthly_wage_ceiling: f64,
    pub annual_contribution_limit: f64,
    pub transition_age: u32,
    pub basic_retirement_sum: f64,
    pub full_retirement_sum: f64,
    pub enhanced_retirement_sum: f64,
    /// Minimum amount reported as withdrawable at the transition
    pub minimum_withdrawal: f64,
    pub annuity: AnnuityRules,
}

const CONTRIBUTION_BRACKETS: &[ContributionBracket] = &[
    ContributionBracket {
        min_age: 0,
        max_age: 55,
        employer_rate: 0.17,
        employee_rate: 0.20,
    },
    ContributionBracket {
        min_age: 55,
        max_age: 60,
        employer_rate: 0.155,
        employee_rate: 0.17,
    },
    ContributionBracket {
        min_age: 60,
        max_age: 65,
        employer_rate: 0.12,
        employee_rate: 0.115,
    },
    ContributionBracket {
        min_age: 65,
        max_age: 70,
        employer_rate: 0.09,
        employee_rate: 0.075,
    },
    ContributionBracket {
        min_age: 70,
        max_age: 121,
        employer_rate: 0.075,
        employee_rate: 0.05,
    },
];

const ALLOCATION_BRACKETS: &[AllocationBracket] = &[
    AllocationBracket {
        min_age: 0,
        max_age: 36,
        ordinary: 0.6217,
        special: 0.1621,
        medisave: 0.2162,
        retirement: 0.0,
    },
    AllocationBracket {
        min_age: 36,
        max_age: 46,
        ordinary: 0.5677,
        special: 0.1891,
        medisave: 0.2432,
        retirement: 0.0,
    },
    AllocationBracket {
        min_age: 46,
        max_age: 51,
        ordinary: 0.5136,
        special: 0.2162,
        medisave: 0.2702,
        retirement: 0.0,
    },
    AllocationBracket {
        min_age: 51,
        max_age: 55,
        ordinary: 0.4055,
        special: 0.3108,
        medisave: 0.2837,
        retirement: 0.0,
    },
    AllocationBracket {
        min_age: 55,
        max_age: 60,
        ordinary: 0.3539,
        special: 0.0,
        medisave: 0.3076,
        retirement: 0.3385,
    },
    AllocationBracket {
        min_age: 60,
        max_age: 65,
        ordinary: 0.1493,
        special: 0.0,
        medisave: 0.4477,
        retirement: 0.4030,
    },
    AllocationBracket {
        min_age: 65,
        max_age: 70,
        ordinary: 0.0606,
        special: 0.0,
        medisave: 0.6970,
        retirement: 0.2424,
    },
    AllocationBracket {
        min_age: 70,
        max_age: 121,
        ordinary: 0.08,
        special: 0.0,
        medisave: 0.84,
        retirement: 0.08,
    },
];

/// Scheme parameters in force for projections
pub static CPF_2025: RateTables = RateTables {
    contribution_brackets: CONTRIBUTION_BRACKETS,
    allocation_brackets: ALLOCATION_BRACKETS,
    base_interest: BaseInterestRates {
        ordinary: 0.025,
        special: 0.04,
        medisave: 0.04,
        retirement: 0.04,
    },
    extra_interest: ExtraInterestRules {
        pre_transition_rate: 0.01,
        pre_transition_cap: 60_000.0,
        pre_transition_ordinary_cap: 20_000.0,
        first_tier_rate: 0.02,
        first_tier_cap: 30_000.0,
        second_tier_rate: 0.01,
        second_tier_cap: 30_000.0,
    },
    monthly_wage_ceiling: 7_400.0,
    annual_contribution_limit: 37_740.0,
    transition_age: 55,
    basic_retirement_sum: 106_500.0,
    full_retirement_sum: 213_000.0,
    enhanced_retirement_sum: 426_000.0,
    minimum_withdrawal: 5_000.0,
    annuity: AnnuityRules {
        default_payout_age: 65,
        deferred_payout_age: 70,
        deferment_bonus: 1.35,
        standard_multiplier: 1.0,
        basic_multiplier: 1.05,
        escalating_multiplier: 0.8,
        escalation_rate: 0.02,
        payout_ranges: [
            PayoutRange {
                tier: RetirementSumTier::Basic,
                min_monthly: 860.0,
                max_monthly: 930.0,
            },
            PayoutRange {
                tier: RetirementSumTier::Full,
                min_monthly: 1_570.0,
                max_monthly: 1_690.0,
            },
            PayoutRange {
                tier: RetirementSumTier::Enhanced,
                min_monthly: 3_000.0,
                max_monthly: 3_240.0,
            },
        ],
    },
};

impl RateTables {
    /// Tables used by default for every projection
    pub fn current() -> &'static RateTables {
        &CPF_2025
    }

    pub fn contribution_bracket(&self, age: u32) -> Result<&ContributionBracket, RateTableError> {
        self.contribution_brackets
            .iter()
            .find(|b| age >= b.min_age && age < b.max_age)
            .ok_or(RateTableError::NoBracket {
                table: "contribution",
                age,
            })
    }

    pub fn allocation_bracket(&self, age: u32) -> Result<&AllocationBracket, RateTableError> {
        self.allocation_brackets
            .iter()
            .find(|b| age >= b.min_age && age < b.max_age)
            .ok_or(RateTableError::NoBracket {
                table: "allocation",
                age,
            })
    }

    pub fn retirement_sum(&self, tier: RetirementSumTier) -> f64 {
        match tier {
            RetirementSumTier::Basic => self.basic_retirement_sum,
            RetirementSumTier::Full => self.full_retirement_sum,
            RetirementSumTier::Enhanced => self.enhanced_retirement_sum,
        }
    }

    /// The highest retirement-sum tier; caps the retirement account
    pub fn highest_retirement_sum(&self) -> f64 {
        self.enhanced_retirement_sum
    }

    pub fn plan_multiplier(&self, plan: AnnuityPlan) -> f64 {
        match plan {
            AnnuityPlan::Standard => self.annuity.standard_multiplier,
            AnnuityPlan::Basic => self.annuity.basic_multiplier,
            AnnuityPlan::Escalating => self.annuity.escalating_multiplier,
        }
    }

    pub fn is_post_transition(&self, age: u32) -> bool {
        age >= self.transition_age
    }
}
