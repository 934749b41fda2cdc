//! Loan amortization
//!
//! Produces month-by-month payment schedules for fixed-rate loans. Extra
//! payments shorten the schedule; the principal reduction in any month never
//! exceeds the remaining balance.

use rustc_hash::FxHashMap;

use crate::date_math::MonthStamp;
use crate::model::{Loan, PaymentBreakdown};
use crate::money::{monthly_rate_from_percent, round_money};

/// Balances at or below this are treated as paid off
pub const PAYOFF_EPSILON: f64 = 0.005;

/// Level monthly payment from the annuity formula.
///
/// `M = P·r(1+r)^n / ((1+r)^n − 1)`, or `P/n` at a zero rate. Degenerate loans
/// pay nothing.
pub fn monthly_payment(loan: &Loan) -> f64 {
    if loan.principal <= 0.0 || loan.term_months == 0 {
        return 0.0;
    }
    let n = loan.term_months as i32;
    let r = monthly_rate_from_percent(loan.interest_rate);
    if r == 0.0 {
        return round_money(loan.principal / n as f64);
    }
    let growth = (1.0 + r).powi(n);
    round_money(loan.principal * r * growth / (growth - 1.0))
}

/// Extra payments summed per month
fn extra_payments_by_month(loan: &Loan) -> FxHashMap<MonthStamp, f64> {
    let mut by_month = FxHashMap::default();
    for extra in &loan.extra_payments {
        let entry = by_month.entry(extra.date).or_insert(0.0);
        *entry = round_money(*entry + extra.amount.max(0.0));
    }
    by_month
}

/// Full payment schedule for `loan`.
///
/// Ends early once the balance is paid down. Any rounding residue left after
/// the final scheduled month is folded into that month's principal so the
/// schedule always closes at zero.
pub fn amortization_schedule(loan: &Loan) -> Vec<PaymentBreakdown> {
    let payment = monthly_payment(loan);
    if payment == 0.0 {
        return Vec::new();
    }

    let rate = monthly_rate_from_percent(loan.interest_rate);
    let extras = extra_payments_by_month(loan);
    let mut balance = round_money(loan.principal);
    let mut schedule = Vec::with_capacity(loan.term_months as usize);

    for k in 0..loan.term_months {
        if balance <= PAYOFF_EPSILON {
            break;
        }
        let date = loan.start_date.add_months(k as i32);
        let interest = round_money(balance * rate);

        let mut principal = round_money(payment - interest).clamp(0.0, balance);
        let room = round_money(balance - principal);
        let extra = extras.get(&date).copied().unwrap_or(0.0).min(room);
        balance = round_money(balance - principal - extra);

        if k + 1 == loan.term_months && balance > 0.0 {
            principal = round_money(principal + balance);
            balance = 0.0;
        }

        schedule.push(PaymentBreakdown {
            payment_number: k + 1,
            date,
            payment: round_money(interest + principal),
            interest,
            principal,
            extra_payment: extra,
            balance,
        });
    }

    schedule
}

/// Sum of interest across the schedule
pub fn total_interest(schedule: &[PaymentBreakdown]) -> f64 {
    schedule
        .iter()
        .fold(0.0, |total, row| round_money(total + row.interest))
}

/// Cash paid toward `loan` in the given calendar month.
///
/// Zero before the first payment and after payoff.
pub fn payment_for_month(loan: &Loan, year: i16, month: i8) -> f64 {
    match MonthStamp::new(year, month) {
        Ok(month) => LoanSchedule::new(loan).outlay(month),
        Err(_) => 0.0,
    }
}

/// A loan with its schedule precomputed for O(1) monthly lookups
#[derive(Debug, Clone)]
pub struct LoanSchedule {
    pub name: String,
    pub start: MonthStamp,
    pub rows: Vec<PaymentBreakdown>,
    /// Draw from the ordinary savings account
    pub draws_on_cpf: bool,
    pub cpf_monthly_cap: Option<f64>,
}

impl LoanSchedule {
    pub fn new(loan: &Loan) -> Self {
        Self {
            name: loan.name.clone(),
            start: loan.start_date,
            rows: amortization_schedule(loan),
            draws_on_cpf: loan.draws_on_cpf(),
            cpf_monthly_cap: loan.cpf_monthly_cap,
        }
    }

    pub fn row(&self, month: MonthStamp) -> Option<&PaymentBreakdown> {
        let offset = month.months_since(self.start);
        if offset < 0 {
            return None;
        }
        self.rows.get(offset as usize)
    }

    /// Scheduled payment plus any extra payment in `month`
    pub fn outlay(&self, month: MonthStamp) -> f64 {
        self.row(month).map(|r| r.total_outlay()).unwrap_or(0.0)
    }

    /// Whether `month` carries the final payment
    pub fn is_final_month(&self, month: MonthStamp) -> bool {
        self.row(month)
            .is_some_and(|r| r.payment_number as usize == self.rows.len())
    }

    pub fn total_interest(&self) -> f64 {
        total_interest(&self.rows)
    }
}
