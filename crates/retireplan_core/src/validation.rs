//! Input validation
//!
//! Problems are collected rather than returned one at a time, so a caller can
//! show every issue with a document at once. Field paths use the camelCase
//! wire names with indices for nested records (`loans[0].termMonths`).

use std::fmt;

use crate::date_math::MonthStamp;
use crate::model::{
    ActivationWindow, Frequency, RateTables, RetirementExpense, UserData, WithdrawalStrategy,
};

/// Highest age any input may name
pub const MAX_AGE: u32 = 120;
/// Longest accepted loan term
pub const MAX_TERM_MONTHS: u32 = 600;

/// One problem with one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every problem found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Whether any error concerns `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

struct Collector(Vec<ValidationError>);

impl Collector {
    fn check(&mut self, ok: bool, field: impl Into<String>, message: impl Into<String>) {
        if !ok {
            self.0.push(ValidationError::new(field, message));
        }
    }

    fn amount(&mut self, value: f64, field: impl Into<String>) {
        self.check(
            value.is_finite() && value >= 0.0,
            field,
            "must be a non-negative amount",
        );
    }

    fn percent(&mut self, value: f64, min: f64, max: f64, field: impl Into<String>) {
        self.check(
            value.is_finite() && (min..=max).contains(&value),
            field,
            format!("must be between {min}% and {max}%"),
        );
    }
}

/// Validate `data` for a run anchored at `anchor` with the bundled tables
pub fn validate(data: &UserData, anchor: MonthStamp) -> Vec<ValidationError> {
    validate_with_tables(data, anchor, RateTables::current())
}

/// Validate `data` against the payout ages allowed by `tables`
pub fn validate_with_tables(
    data: &UserData,
    anchor: MonthStamp,
    tables: &RateTables,
) -> Vec<ValidationError> {
    let mut c = Collector(Vec::new());

    // Person
    c.check(
        data.current_age <= MAX_AGE,
        "currentAge",
        format!("must be between 0 and {MAX_AGE}"),
    );
    c.check(
        data.retirement_age <= MAX_AGE,
        "retirementAge",
        format!("must be between 0 and {MAX_AGE}"),
    );
    c.check(
        data.retirement_age > data.current_age,
        "retirementAge",
        "must be greater than current age",
    );
    c.amount(data.current_savings, "currentSavings");
    c.percent(data.expected_return, -100.0, 100.0, "expectedReturn");
    c.percent(data.inflation_rate, -50.0, 100.0, "inflationRate");

    // Income
    for (i, income) in data.income_sources.iter().enumerate() {
        let path = format!("incomeSources[{i}]");
        c.check(
            !income.name.trim().is_empty(),
            format!("{path}.name"),
            "is required",
        );
        c.amount(income.amount, format!("{path}.amount"));
        // An unrecognised frequency contributes nothing rather than failing
        if income.frequency == Frequency::Custom {
            c.check(
                income.custom_days.is_some_and(|d| d.is_finite() && d > 0.0),
                format!("{path}.customDays"),
                "must be a positive number of days for a custom frequency",
            );
        }
        if let Some(end) = income.end_date {
            c.check(
                end > income.start_date,
                format!("{path}.endDate"),
                "must be after the start date",
            );
        }
    }

    for (i, item) in data.one_off_returns.iter().enumerate() {
        c.amount(item.amount, format!("oneOffReturns[{i}].amount"));
    }

    // Expenses
    for (i, expense) in data.expenses.iter().enumerate() {
        validate_expense(&mut c, &format!("expenses[{i}]"), expense, anchor);
    }

    for (i, item) in data.one_time_expenses.iter().enumerate() {
        c.amount(item.amount, format!("oneTimeExpenses[{i}].amount"));
    }

    // Loans
    for (i, loan) in data.loans.iter().enumerate() {
        let path = format!("loans[{i}]");
        c.check(
            loan.principal.is_finite() && loan.principal > 0.0,
            format!("{path}.principal"),
            "must be greater than 0",
        );
        c.percent(loan.interest_rate, 0.0, 100.0, format!("{path}.interestRate"));
        c.check(
            (1..=MAX_TERM_MONTHS).contains(&loan.term_months),
            format!("{path}.termMonths"),
            format!("must be between 1 and {MAX_TERM_MONTHS} months"),
        );
        if let Some(cap) = loan.cpf_monthly_cap {
            c.amount(cap, format!("{path}.cpfMonthlyCap"));
        }
        for (j, extra) in loan.extra_payments.iter().enumerate() {
            let path = format!("{path}.extraPayments[{j}]");
            c.amount(extra.amount, format!("{path}.amount"));
            c.check(
                extra.date >= loan.start_date,
                format!("{path}.date"),
                "must not precede the loan start",
            );
        }
    }

    // Mandatory savings
    if let Some(cpf) = data.active_cpf() {
        let b = &cpf.balances;
        c.amount(b.ordinary, "cpf.balances.ordinary");
        c.amount(b.special, "cpf.balances.special");
        c.amount(b.medisave, "cpf.balances.medisave");
        c.amount(b.retirement, "cpf.balances.retirement");
        if let Some(age) = cpf.payout_age {
            let allowed = [
                tables.annuity.default_payout_age,
                tables.annuity.deferred_payout_age,
            ];
            c.check(
                allowed.contains(&age),
                "cpf.payoutAge",
                format!("must be {} or {}", allowed[0], allowed[1]),
            );
        }
    }

    // Retirement
    let retirement = &data.retirement;
    // A horizon equal to the retirement age leaves no retired months to search
    if let Some(horizon) = retirement.horizon_age {
        c.check(
            horizon >= data.retirement_age && horizon <= MAX_AGE,
            "retirement.horizonAge",
            format!("must not precede retirement age and be at most {MAX_AGE}"),
        );
    }
    match retirement.withdrawal_strategy {
        WithdrawalStrategy::Fixed { monthly_amount } => {
            c.amount(monthly_amount, "retirement.withdrawalStrategy.monthlyAmount");
        }
        WithdrawalStrategy::Percentage { annual_rate } => {
            c.percent(
                annual_rate,
                0.0,
                100.0,
                "retirement.withdrawalStrategy.annualRate",
            );
        }
        WithdrawalStrategy::Combined {
            monthly_amount,
            annual_rate,
        } => {
            c.amount(monthly_amount, "retirement.withdrawalStrategy.monthlyAmount");
            c.percent(
                annual_rate,
                0.0,
                100.0,
                "retirement.withdrawalStrategy.annualRate",
            );
        }
    }

    c.0
}

fn validate_expense(c: &mut Collector, path: &str, expense: &RetirementExpense, anchor: MonthStamp) {
    c.check(
        !expense.name.trim().is_empty(),
        format!("{path}.name"),
        "is required",
    );
    c.amount(expense.monthly_amount, format!("{path}.monthlyAmount"));
    c.percent(
        expense.inflation_rate,
        -50.0,
        100.0,
        format!("{path}.inflationRate"),
    );

    match expense.window {
        ActivationWindow::Dates { start, end } => {
            if let Some(end) = end {
                c.check(
                    end > anchor,
                    format!("{path}.endDate"),
                    "must not be in the past",
                );
                if let Some(start) = start {
                    c.check(
                        end > start,
                        format!("{path}.endDate"),
                        "must be after the start date",
                    );
                }
            }
        }
        ActivationWindow::Ages { start, end } => {
            if let Some(start) = start {
                c.check(
                    start <= MAX_AGE,
                    format!("{path}.startAge"),
                    format!("must be at most {MAX_AGE}"),
                );
            }
            if let Some(end) = end {
                c.check(
                    end <= MAX_AGE,
                    format!("{path}.endAge"),
                    format!("must be at most {MAX_AGE}"),
                );
                if let Some(start) = start {
                    c.check(
                        end > start,
                        format!("{path}.endAge"),
                        "must be greater than the start age",
                    );
                }
            }
        }
    }
}

/// Validate and aggregate; `Ok` when the document is clean
pub fn validate_user_data(data: &UserData, anchor: MonthStamp) -> Result<(), ValidationErrors> {
    validate_user_data_with_tables(data, anchor, RateTables::current())
}

pub fn validate_user_data_with_tables(
    data: &UserData,
    anchor: MonthStamp,
    tables: &RateTables,
) -> Result<(), ValidationErrors> {
    let errors = validate_with_tables(data, anchor, tables);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
