//! Mandatory-savings (CPF) engine
//!
//! Computes monthly contributions, splits them across the four accounts,
//! accrues base and bonus interest, and performs the one-time transition at
//! the transition age, when the special account closes into the retirement
//! account.
//!
//! The free functions are pure and operate on explicit balances; `CpfEngine`
//! wraps them with the per-person state a simulation threads month to month
//! (balances, year-to-date contributions, whether the transition has run).

use tracing::{debug, trace};

use crate::error::RateTableError;
use crate::model::{
    ContributionSplit, CpfAccounts, CpfConfig, InterestBreakdown, RateTables, RetirementSumTier,
    TransitionOutcome,
};
use crate::money::round_money;

/// Contribution for one month of wages.
///
/// The wage is clipped to the monthly ceiling before the bracket rates apply.
/// When the year's running total would pass the annual limit, employee and
/// employer shares shrink by the same factor so the total lands exactly on
/// the remaining headroom.
pub fn compute_contribution(
    tables: &RateTables,
    age: u32,
    wage: f64,
    ytd_contributions: f64,
) -> Result<ContributionSplit, RateTableError> {
    let bracket = tables.contribution_bracket(age)?;
    let eligible_wage = wage.max(0.0).min(tables.monthly_wage_ceiling);

    let employee = round_money(eligible_wage * bracket.employee_rate);
    let employer = round_money(eligible_wage * bracket.employer_rate);
    let total = round_money(employee + employer);

    let headroom = round_money((tables.annual_contribution_limit - ytd_contributions).max(0.0));
    if total <= headroom {
        return Ok(ContributionSplit {
            employee,
            employer,
            total,
            capped: false,
        });
    }

    let factor = headroom / total;
    let employee = round_money(employee * factor);
    Ok(ContributionSplit {
        employee,
        employer: round_money(headroom - employee),
        total: headroom,
        capped: true,
    })
}

/// Split a total contribution across the accounts by the age's allocation shares.
///
/// The medisave account takes the rounding remainder so the parts always sum
/// to `total`.
pub fn allocate_contribution(
    tables: &RateTables,
    age: u32,
    total: f64,
) -> Result<CpfAccounts, RateTableError> {
    let bracket = tables.allocation_bracket(age)?;
    let ordinary = round_money(total * bracket.ordinary);

    if tables.is_post_transition(age) {
        let retirement = round_money(total * bracket.retirement);
        Ok(CpfAccounts {
            ordinary,
            special: 0.0,
            medisave: round_money(total - ordinary - retirement),
            retirement,
        })
    } else {
        let special = round_money(total * bracket.special);
        Ok(CpfAccounts {
            ordinary,
            special,
            medisave: round_money(total - ordinary - special),
            retirement: 0.0,
        })
    }
}

/// Credit an allocated contribution to `accounts`.
///
/// After the transition the retirement account never grows past the highest
/// retirement sum through contributions; the overflow goes to the ordinary
/// account instead. Returns what each account actually received.
pub fn route_contribution(
    tables: &RateTables,
    accounts: &mut CpfAccounts,
    age: u32,
    allocation: CpfAccounts,
) -> CpfAccounts {
    let mut credited = allocation;

    if tables.is_post_transition(age) {
        let room = round_money((tables.highest_retirement_sum() - accounts.retirement).max(0.0));
        let to_retirement = allocation.retirement.min(room);
        let overflow = round_money(allocation.retirement - to_retirement);
        credited.retirement = to_retirement;
        credited.ordinary = round_money(allocation.ordinary + overflow + allocation.special);
        credited.special = 0.0;
    }

    accounts.ordinary = round_money(accounts.ordinary + credited.ordinary);
    accounts.special = round_money(accounts.special + credited.special);
    accounts.medisave = round_money(accounts.medisave + credited.medisave);
    accounts.retirement = round_money(accounts.retirement + credited.retirement);
    credited
}

/// Share `amount` across four buckets in proportion to `weights`.
///
/// The last bucket with a positive weight absorbs the rounding remainder so
/// the parts sum to `amount`.
fn distribute(amount: f64, weights: [f64; 4]) -> [f64; 4] {
    let total_weight: f64 = weights.iter().sum();
    let mut parts = [0.0; 4];
    if amount == 0.0 || total_weight <= 0.0 {
        return parts;
    }
    let Some(last) = weights.iter().rposition(|w| *w > 0.0) else {
        return parts;
    };

    let mut allotted = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        if i == last {
            break;
        }
        if *weight > 0.0 {
            parts[i] = round_money(amount * weight / total_weight);
            allotted = round_money(allotted + parts[i]);
        }
    }
    parts[last] = round_money(amount - allotted);
    parts
}

/// Base interest for one month.
///
/// The special account earns only before the transition age and the
/// retirement account only from it.
pub fn base_interest(tables: &RateTables, accounts: &CpfAccounts, age: u32) -> CpfAccounts {
    let rates = &tables.base_interest;
    let post = tables.is_post_transition(age);
    CpfAccounts {
        ordinary: round_money(accounts.ordinary.max(0.0) * rates.ordinary / 12.0),
        special: if post {
            0.0
        } else {
            round_money(accounts.special.max(0.0) * rates.special / 12.0)
        },
        medisave: round_money(accounts.medisave.max(0.0) * rates.medisave / 12.0),
        retirement: if post {
            round_money(accounts.retirement.max(0.0) * rates.retirement / 12.0)
        } else {
            0.0
        },
    }
}

/// Bonus interest for one month.
///
/// Before the transition age a single rate applies to the first slice of the
/// combined ordinary (itself sub-capped), special and medisave balances,
/// credited back in proportion to each account's eligible amount. From the
/// transition age two cascading tiers apply to the combined balance of all
/// four accounts, credited back in proportion to each account's balance.
pub fn extra_interest(tables: &RateTables, accounts: &CpfAccounts, age: u32) -> CpfAccounts {
    let rules = &tables.extra_interest;
    let balances = accounts.as_array().map(|b| b.max(0.0));

    if tables.is_post_transition(age) {
        let combined: f64 = balances.iter().sum();
        let first = combined.min(rules.first_tier_cap);
        let second = (combined - rules.first_tier_cap)
            .max(0.0)
            .min(rules.second_tier_cap);
        let bonus = round_money(
            round_money(first * rules.first_tier_rate / 12.0)
                + round_money(second * rules.second_tier_rate / 12.0),
        );
        return CpfAccounts::from_array(distribute(bonus, balances));
    }

    let [ordinary, special, medisave, _] = balances;
    let eligible_ordinary = ordinary.min(rules.pre_transition_ordinary_cap);
    let mut remaining = rules.pre_transition_cap - eligible_ordinary;
    let eligible_special = special.min(remaining);
    remaining -= eligible_special;
    let eligible_medisave = medisave.min(remaining);

    let eligible = eligible_ordinary + eligible_special + eligible_medisave;
    let bonus = round_money(eligible * rules.pre_transition_rate / 12.0);
    CpfAccounts::from_array(distribute(
        bonus,
        [eligible_ordinary, eligible_special, eligible_medisave, 0.0],
    ))
}

/// Base plus bonus interest for one month
pub fn monthly_interest(tables: &RateTables, accounts: &CpfAccounts, age: u32) -> InterestBreakdown {
    InterestBreakdown {
        base: base_interest(tables, accounts, age),
        extra: extra_interest(tables, accounts, age),
    }
}

/// Credit interest to `accounts`, one account at a time
pub fn apply_interest(accounts: &mut CpfAccounts, interest: &InterestBreakdown) {
    let base = interest.base;
    let extra = interest.extra;
    accounts.ordinary = round_money(accounts.ordinary + base.ordinary + extra.ordinary);
    accounts.special = round_money(accounts.special + base.special + extra.special);
    accounts.medisave = round_money(accounts.medisave + base.medisave + extra.medisave);
    accounts.retirement = round_money(accounts.retirement + base.retirement + extra.retirement);
}

/// Close the special account into the retirement account.
///
/// The retirement account is funded up to `tier`'s target, first from the
/// special account and then from the ordinary account. Whatever remains of
/// the special account moves to the ordinary account, so
/// `ordinary + retirement` after equals `ordinary + special + retirement`
/// before.
pub fn transition(
    tables: &RateTables,
    accounts: &mut CpfAccounts,
    tier: RetirementSumTier,
) -> TransitionOutcome {
    let before = *accounts;
    let target = tables.retirement_sum(tier);

    let above_highest =
        round_money(before.ordinary + before.special - tables.highest_retirement_sum());
    let withdrawable = above_highest.max(tables.minimum_withdrawal);

    let mut needed = round_money((target - before.retirement).max(0.0));
    let from_special = before.special.max(0.0).min(needed);
    needed = round_money(needed - from_special);
    let from_ordinary = before.ordinary.max(0.0).min(needed);

    let special_left = round_money(before.special - from_special);
    accounts.retirement = round_money(before.retirement + from_special + from_ordinary);
    accounts.ordinary = round_money(before.ordinary - from_ordinary + special_left);
    accounts.special = 0.0;

    TransitionOutcome {
        target,
        from_special,
        from_ordinary,
        before,
        after: *accounts,
        withdrawable,
    }
}

/// Result of crediting one month's wages
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlyContribution {
    pub split: ContributionSplit,
    /// What each account received after routing
    pub credited: CpfAccounts,
    /// Uncapped total, for reporting
    pub requested: f64,
}

/// Per-person scheme state carried through a simulation
#[derive(Debug, Clone)]
pub struct CpfEngine<'t> {
    tables: &'t RateTables,
    accounts: CpfAccounts,
    tier: RetirementSumTier,
    ytd_contributions: f64,
    transitioned: bool,
}

impl<'t> CpfEngine<'t> {
    pub fn new(tables: &'t RateTables, config: &CpfConfig) -> Self {
        Self {
            tables,
            accounts: config.balances,
            tier: config.retirement_sum,
            ytd_contributions: 0.0,
            transitioned: false,
        }
    }

    pub fn accounts(&self) -> CpfAccounts {
        self.accounts
    }

    pub fn ytd_contributions(&self) -> f64 {
        self.ytd_contributions
    }

    pub fn has_transitioned(&self) -> bool {
        self.transitioned
    }

    /// Start of a calendar year: the annual limit resets
    pub fn reset_year(&mut self) {
        self.ytd_contributions = 0.0;
    }

    /// Run the transition if `age` has reached the transition age and it has
    /// not run yet.
    pub fn maybe_transition(&mut self, age: u32) -> Option<TransitionOutcome> {
        if self.transitioned || !self.tables.is_post_transition(age) {
            return None;
        }
        self.transitioned = true;
        let outcome = transition(self.tables, &mut self.accounts, self.tier);
        debug!(
            age,
            from_special = outcome.from_special,
            from_ordinary = outcome.from_ordinary,
            retirement = outcome.after.retirement,
            withdrawable = outcome.withdrawable,
            "CPF transition"
        );
        Some(outcome)
    }

    /// Contribute on `wage` for a month at `age`
    pub fn contribute(&mut self, age: u32, wage: f64) -> Result<MonthlyContribution, RateTableError> {
        if wage <= 0.0 {
            return Ok(MonthlyContribution::default());
        }
        let uncapped = compute_contribution(self.tables, age, wage, 0.0)?;
        let split = compute_contribution(self.tables, age, wage, self.ytd_contributions)?;
        self.ytd_contributions = round_money(self.ytd_contributions + split.total);

        let allocation = allocate_contribution(self.tables, age, split.total)?;
        let credited = route_contribution(self.tables, &mut self.accounts, age, allocation);
        trace!(age, total = split.total, capped = split.capped, "CPF contribution");

        Ok(MonthlyContribution {
            split,
            credited,
            requested: uncapped.total,
        })
    }

    /// Accrue one month of interest at `age`
    pub fn accrue_interest(&mut self, age: u32) -> InterestBreakdown {
        let interest = monthly_interest(self.tables, &self.accounts, age);
        apply_interest(&mut self.accounts, &interest);
        interest
    }

    /// Draw up to `amount` from the ordinary account (e.g. for a housing loan).
    /// Returns the amount drawn.
    pub fn draw_ordinary(&mut self, amount: f64) -> f64 {
        let drawn = amount.max(0.0).min(self.accounts.ordinary.max(0.0));
        self.accounts.ordinary = round_money(self.accounts.ordinary - drawn);
        drawn
    }

    /// Empty the retirement account (annuity premium). Returns the balance taken.
    pub fn take_retirement_balance(&mut self) -> f64 {
        std::mem::take(&mut self.accounts.retirement)
    }
}
