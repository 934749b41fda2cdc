//! Cash flow normalization
//!
//! Converts income streams and expenses into the amount they contribute in a
//! given simulation month. Month 0 is the anchor month; activation windows are
//! half-open `[start, end)` ranges of month offsets from it, and a missing end
//! never closes.

use crate::date_math::MonthStamp;
use crate::model::{
    ActivationWindow, Frequency, IncomeStream, OneOffReturn, OneTimeExpense, RetirementExpense,
};
use crate::money::round_money;

/// Average days per month used to scale daily amounts
pub const DAYS_PER_MONTH: f64 = 30.44;
/// Average days per year used to scale custom-period amounts
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Fixed facts about a run needed to place a record in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CashFlowContext {
    pub anchor: MonthStamp,
    pub current_age: u32,
}

impl CashFlowContext {
    pub fn new(anchor: MonthStamp, current_age: u32) -> Self {
        Self {
            anchor,
            current_age,
        }
    }

    /// Calendar month of simulation month `index`
    pub fn stamp(&self, index: u32) -> MonthStamp {
        self.anchor.add_months(index as i32)
    }

    /// Month offset of a calendar month
    pub fn date_offset(&self, month: MonthStamp) -> i64 {
        month.months_since(self.anchor) as i64
    }

    /// Month offset at which the person turns `age`
    pub fn age_offset(&self, age: u32) -> i64 {
        (age as i64 - self.current_age as i64) * 12
    }
}

/// Anything that yields an amount in a simulation month
pub trait CashFlowSource {
    fn monthly_amount(&self, ctx: &CashFlowContext, index: u32) -> f64;
}

/// Scale an amount paid at `frequency` to its monthly equivalent.
///
/// Unspecified frequencies, and custom frequencies without a positive day
/// count, normalize to zero.
pub fn monthly_equivalent(amount: f64, frequency: Frequency, custom_days: Option<f64>) -> f64 {
    let monthly = match frequency {
        Frequency::Daily => amount * DAYS_PER_MONTH,
        Frequency::Weekly => amount * 52.0 / 12.0,
        Frequency::Monthly => amount,
        Frequency::Yearly => amount / 12.0,
        Frequency::Custom => match custom_days {
            Some(days) if days > 0.0 => amount * DAYS_PER_YEAR / days / 12.0,
            _ => 0.0,
        },
        Frequency::Unspecified => 0.0,
    };
    round_money(monthly)
}

#[inline]
fn in_window(index: i64, start: i64, end: Option<i64>) -> bool {
    index >= start && end.is_none_or(|end| index < end)
}

impl IncomeStream {
    /// `[start, end)` as month offsets
    pub fn window_offsets(&self, ctx: &CashFlowContext) -> (i64, Option<i64>) {
        (
            ctx.date_offset(self.start_date),
            self.end_date.map(|end| ctx.date_offset(end)),
        )
    }

    pub fn is_active(&self, ctx: &CashFlowContext, index: u32) -> bool {
        let (start, end) = self.window_offsets(ctx);
        in_window(index as i64, start, end)
    }
}

impl CashFlowSource for IncomeStream {
    fn monthly_amount(&self, ctx: &CashFlowContext, index: u32) -> f64 {
        if !self.is_active(ctx, index) {
            return 0.0;
        }
        monthly_equivalent(self.amount, self.frequency, self.custom_days)
    }
}

impl RetirementExpense {
    /// `[start, end)` as month offsets; a missing start is the anchor
    pub fn window_offsets(&self, ctx: &CashFlowContext) -> (i64, Option<i64>) {
        match self.window {
            ActivationWindow::Dates { start, end } => (
                start.map(|s| ctx.date_offset(s)).unwrap_or(0),
                end.map(|e| ctx.date_offset(e)),
            ),
            ActivationWindow::Ages { start, end } => (
                start.map(|s| ctx.age_offset(s)).unwrap_or(0),
                end.map(|e| ctx.age_offset(e)),
            ),
        }
    }

    pub fn is_active(&self, ctx: &CashFlowContext, index: u32) -> bool {
        let (start, end) = self.window_offsets(ctx);
        in_window(index as i64, start, end)
    }

    /// Whole years of inflation applied in month `index`.
    ///
    /// Counted from the later of the expense's own start and the anchor.
    pub fn inflation_years(&self, ctx: &CashFlowContext, index: u32) -> i32 {
        let (start, _) = self.window_offsets(ctx);
        let since = index as i64 - start.max(0);
        (since.max(0) / 12) as i32
    }
}

impl CashFlowSource for RetirementExpense {
    fn monthly_amount(&self, ctx: &CashFlowContext, index: u32) -> f64 {
        if !self.is_active(ctx, index) {
            return 0.0;
        }
        let years = self.inflation_years(ctx, index);
        let factor = (1.0 + self.inflation_rate / 100.0).powi(years);
        round_money(self.monthly_amount * factor)
    }
}

/// Income received in month `index`: `(total, cpf-eligible wage)`
pub fn month_income(sources: &[IncomeStream], ctx: &CashFlowContext, index: u32) -> (f64, f64) {
    sources.iter().fold((0.0, 0.0), |(total, eligible), source| {
        let amount = source.monthly_amount(ctx, index);
        let eligible = if source.cpf_eligible {
            round_money(eligible + amount)
        } else {
            eligible
        };
        (round_money(total + amount), eligible)
    })
}

/// Recurring expenses due in month `index`
pub fn month_expenses(expenses: &[RetirementExpense], ctx: &CashFlowContext, index: u32) -> f64 {
    expenses.iter().fold(0.0, |total, expense| {
        round_money(total + expense.monthly_amount(ctx, index))
    })
}

/// One-off inflows dated in `month`
pub fn month_one_off_returns(items: &[OneOffReturn], month: MonthStamp) -> f64 {
    items
        .iter()
        .filter(|item| item.date == month)
        .fold(0.0, |total, item| round_money(total + item.amount))
}

/// One-time outflows dated in `month`
pub fn month_one_time_expenses(items: &[OneTimeExpense], month: MonthStamp) -> f64 {
    items
        .iter()
        .filter(|item| item.date == month)
        .fold(0.0, |total, item| round_money(total + item.amount))
}
