//! UserData Builder
//!
//! Fluent construction of a `UserData` for programmatic callers and tests.
//! Every method consumes and returns the builder; `build` hands back the
//! assembled record without validating it (validation runs when a
//! projection starts).

use crate::model::{
    CpfAccounts, CpfConfig, IncomeStream, Loan, OneOffReturn, OneTimeExpense, RetirementExpense,
    UserData, WithdrawalStrategy,
};
use crate::date_math::MonthStamp;

/// Builder for `UserData`
#[derive(Debug, Clone, Default)]
pub struct UserDataBuilder {
    data: UserData,
}

impl UserDataBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Person
    // =========================================================================

    /// Set the current and retirement ages
    #[must_use]
    pub fn ages(mut self, current: u32, retirement: u32) -> Self {
        self.data.current_age = current;
        self.data.retirement_age = retirement;
        self
    }

    /// Set the starting portfolio balance
    #[must_use]
    pub fn savings(mut self, amount: f64) -> Self {
        self.data.current_savings = amount;
        self
    }

    /// Annual portfolio return in percent
    #[must_use]
    pub fn expected_return(mut self, percent: f64) -> Self {
        self.data.expected_return = percent;
        self
    }

    /// Annual inflation in percent
    #[must_use]
    pub fn inflation(mut self, percent: f64) -> Self {
        self.data.inflation_rate = percent;
        self
    }

    // =========================================================================
    // Cash flows
    // =========================================================================

    #[must_use]
    pub fn income(mut self, stream: IncomeStream) -> Self {
        self.data.income_sources.push(stream);
        self
    }

    #[must_use]
    pub fn expense(mut self, expense: RetirementExpense) -> Self {
        self.data.expenses.push(expense);
        self
    }

    #[must_use]
    pub fn loan(mut self, loan: Loan) -> Self {
        self.data.loans.push(loan);
        self
    }

    /// A lump sum credited to the portfolio in `date`'s month
    #[must_use]
    pub fn one_off_return(mut self, date: MonthStamp, amount: f64, description: &str) -> Self {
        self.data.one_off_returns.push(OneOffReturn {
            date,
            amount,
            description: description.to_string(),
        });
        self
    }

    /// A lump sum debited from the portfolio in `date`'s month
    #[must_use]
    pub fn one_time_expense(mut self, date: MonthStamp, amount: f64, description: &str) -> Self {
        self.data.one_time_expenses.push(OneTimeExpense {
            date,
            amount,
            description: description.to_string(),
        });
        self
    }

    // =========================================================================
    // Mandatory savings
    // =========================================================================

    #[must_use]
    pub fn cpf(mut self, config: CpfConfig) -> Self {
        self.data.cpf = Some(config);
        self
    }

    /// Enable the scheme with empty accounts and default settings
    #[must_use]
    pub fn cpf_enabled(self) -> Self {
        self.cpf(CpfConfig {
            enabled: true,
            ..Default::default()
        })
    }

    /// Enable the scheme starting from `balances`
    #[must_use]
    pub fn cpf_balances(self, balances: CpfAccounts) -> Self {
        self.cpf(CpfConfig {
            enabled: true,
            balances,
            ..Default::default()
        })
    }

    // =========================================================================
    // Retirement
    // =========================================================================

    #[must_use]
    pub fn withdrawal(mut self, strategy: WithdrawalStrategy) -> Self {
        self.data.retirement.withdrawal_strategy = strategy;
        self
    }

    /// Age at which the depletion search stops
    #[must_use]
    pub fn horizon_age(mut self, age: u32) -> Self {
        self.data.retirement.horizon_age = Some(age);
        self
    }

    pub fn build(self) -> UserData {
        self.data
    }
}
