//! Loan definitions and amortization rows

use serde::{Deserialize, Serialize};

use crate::date_math::MonthStamp;
use crate::money::round_money;

/// What a loan finances. Only housing loans may be serviced from the
/// ordinary savings account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoanCategory {
    Housing,
    Vehicle,
    Education,
    Personal,
    #[default]
    Other,
}

/// A lump-sum prepayment made in a given month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraPayment {
    pub date: MonthStamp,
    pub amount: f64,
}

/// A fixed-rate amortizing loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(default)]
    pub name: String,
    pub principal: f64,
    /// Annual percent
    pub interest_rate: f64,
    pub term_months: u32,
    /// Month of the first payment
    pub start_date: MonthStamp,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_payments: Vec<ExtraPayment>,
    #[serde(default)]
    pub category: LoanCategory,
    /// Service the payment from the ordinary savings account first
    #[serde(default)]
    pub use_cpf_ordinary: bool,
    /// Most drawn from the ordinary account per month; `None` is uncapped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf_monthly_cap: Option<f64>,
}

impl Loan {
    pub fn new(principal: f64, interest_rate: f64, term_months: u32, start: MonthStamp) -> Self {
        Self {
            name: String::new(),
            principal,
            interest_rate,
            term_months,
            start_date: start,
            extra_payments: Vec::new(),
            category: LoanCategory::Other,
            use_cpf_ordinary: false,
            cpf_monthly_cap: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_extra_payment(mut self, date: MonthStamp, amount: f64) -> Self {
        self.extra_payments.push(ExtraPayment { date, amount });
        self
    }

    #[must_use]
    pub fn housing(mut self) -> Self {
        self.category = LoanCategory::Housing;
        self
    }

    /// Pay from the ordinary savings account, optionally capped per month
    #[must_use]
    pub fn funded_by_cpf(mut self, monthly_cap: Option<f64>) -> Self {
        self.use_cpf_ordinary = true;
        self.cpf_monthly_cap = monthly_cap;
        self
    }

    /// Whether the ordinary savings account may be drawn for this loan
    pub fn draws_on_cpf(&self) -> bool {
        self.use_cpf_ordinary && self.category == LoanCategory::Housing
    }
}

/// One row of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    /// 1-based
    pub payment_number: u32,
    pub date: MonthStamp,
    /// Scheduled payment (interest + scheduled principal)
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub extra_payment: f64,
    /// Balance after this month
    pub balance: f64,
}

impl PaymentBreakdown {
    /// Cash leaving the borrower this month
    pub fn total_outlay(&self) -> f64 {
        round_money(self.payment + self.extra_payment)
    }
}
