use tracing::debug;

use crate::annuity::{ActiveAnnuity, estimate_monthly_payout};
use crate::cash_flows::CashFlowContext;
use crate::config::ProjectionOptions;
use crate::cpf::CpfEngine;
use crate::date_math::MonthStamp;
use crate::error::RateTableError;
use crate::loans::LoanSchedule;
use crate::model::{AnnuityPlan, LedgerEntry, MonthRecord, RateTables, StateEvent, UserData};
use crate::money::{round_money, round_two};

/// Runtime state for one projection, threaded month to month
#[derive(Debug, Clone)]
pub struct SimulationState<'t> {
    pub tables: &'t RateTables,
    pub timeline: SimTimeline,
    pub portfolio: SimPortfolio,
    pub cpf: Option<CpfEngine<'t>>,
    pub annuity: SimAnnuityState,
    pub loans: Vec<LoanSchedule>,
    pub history: SimHistory,
}

#[derive(Debug, Clone, Copy)]
pub struct SimTimeline {
    pub ctx: CashFlowContext,
    /// Index of the month about to be simulated
    pub index: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct SimPortfolio {
    pub balance: f64,
    /// Cumulative positive net cash flow, starting from the opening balance
    pub contributions: f64,
}

#[derive(Debug, Clone, Copy)]
pub enum AnnuityStatus {
    Pending,
    Active(ActiveAnnuity),
    /// Payout age reached with nothing to annuitize
    Unfunded,
}

#[derive(Debug, Clone, Copy)]
pub struct SimAnnuityState {
    pub plan: AnnuityPlan,
    pub payout_age: u32,
    pub status: AnnuityStatus,
}

#[derive(Debug, Clone, Default)]
pub struct SimHistory {
    pub ledger: Vec<LedgerEntry>,
    pub accumulation: Vec<MonthRecord>,
    pub depletion: Vec<MonthRecord>,
    pub record_series: bool,
    /// Year in which the annual-limit entry was last written
    cap_recorded_year: Option<i16>,
}

impl<'t> SimulationState<'t> {
    pub fn new(data: &UserData, options: &ProjectionOptions, tables: &'t RateTables) -> Self {
        let cpf_config = data.active_cpf();
        Self {
            tables,
            timeline: SimTimeline {
                ctx: CashFlowContext::new(options.anchor, data.current_age),
                index: 0,
            },
            portfolio: SimPortfolio {
                balance: round_money(data.current_savings),
                contributions: round_money(data.current_savings),
            },
            cpf: cpf_config.map(|config| CpfEngine::new(tables, config)),
            annuity: SimAnnuityState {
                plan: cpf_config.map(|c| c.annuity_plan).unwrap_or_default(),
                payout_age: cpf_config
                    .and_then(|c| c.payout_age)
                    .unwrap_or(tables.annuity.default_payout_age),
                status: AnnuityStatus::Pending,
            },
            loans: data.loans.iter().map(LoanSchedule::new).collect(),
            history: SimHistory {
                record_series: options.record_series,
                ..Default::default()
            },
        }
    }

    /// Calendar month being simulated
    pub fn month(&self) -> MonthStamp {
        self.timeline.ctx.stamp(self.timeline.index)
    }

    /// Age in whole years during the current month
    pub fn age(&self) -> u32 {
        self.timeline.ctx.current_age + self.timeline.index / 12
    }

    /// Age in fractional years during the current month
    pub fn fractional_age(&self) -> f64 {
        round_two(self.timeline.ctx.current_age as f64 + self.timeline.index as f64 / 12.0)
    }

    pub fn push_ledger(&mut self, event: StateEvent) {
        let entry = LedgerEntry::new(self.month(), self.timeline.index, event);
        self.history.ledger.push(entry);
    }

    /// Lifecycle steps that open every month: the January reset, the
    /// one-time account transition and the one-time annuity activation.
    pub fn begin_month(&mut self) {
        let age = self.age();
        let month = self.month();

        let transition = self.cpf.as_mut().and_then(|engine| {
            if month.is_january() {
                engine.reset_year();
            }
            engine.maybe_transition(age)
        });
        if let Some(outcome) = transition {
            self.push_ledger(StateEvent::CpfTransition(outcome));
        }

        self.maybe_start_annuity(age);
    }

    fn maybe_start_annuity(&mut self, age: u32) {
        if !matches!(self.annuity.status, AnnuityStatus::Pending) || age < self.annuity.payout_age {
            return;
        }
        let Some(engine) = self.cpf.as_mut() else {
            return;
        };

        let premium = engine.take_retirement_balance();
        let payout = estimate_monthly_payout(
            self.tables,
            premium,
            self.annuity.plan,
            self.annuity.payout_age,
        );
        if payout <= 0.0 {
            self.annuity.status = AnnuityStatus::Unfunded;
            return;
        }

        self.annuity.status = AnnuityStatus::Active(ActiveAnnuity {
            plan: self.annuity.plan,
            initial_payout: payout,
            start_index: self.timeline.index,
        });
        debug!(age, premium, payout, plan = ?self.annuity.plan, "Annuity started");
        self.push_ledger(StateEvent::AnnuityStarted {
            plan: self.annuity.plan,
            premium,
            monthly_payout: payout,
        });
    }

    /// Annuity payout credited this month
    pub fn annuity_income(&self) -> f64 {
        match self.annuity.status {
            AnnuityStatus::Active(annuity) => annuity.payout_at(self.tables, self.timeline.index),
            _ => 0.0,
        }
    }

    /// Cash paid toward loans this month.
    ///
    /// Loans allowed to draw on the ordinary account take what they can from
    /// it first (up to their monthly cap); only the remainder is cash.
    pub fn loan_outlays(&mut self) -> f64 {
        let month = self.month();
        let mut cash = 0.0;
        let mut paid_off = Vec::new();

        for schedule in &self.loans {
            let outlay = schedule.outlay(month);
            if outlay <= 0.0 {
                continue;
            }
            let drawn = match self.cpf.as_mut() {
                Some(engine) if schedule.draws_on_cpf => {
                    let limit = schedule.cpf_monthly_cap.unwrap_or(outlay).min(outlay);
                    engine.draw_ordinary(limit)
                }
                _ => 0.0,
            };
            cash = round_money(cash + outlay - drawn);

            if schedule.is_final_month(month) {
                paid_off.push((schedule.name.clone(), schedule.rows.len() as u32));
            }
        }

        for (loan, payments) in paid_off {
            debug!(loan = %loan, payments, "Loan paid off");
            self.push_ledger(StateEvent::LoanPaidOff { loan, payments });
        }
        cash
    }

    /// Contribute on this month's eligible wage.
    ///
    /// Returns the employee share, which comes out of take-home income.
    pub fn contribute_cpf(&mut self, wage: f64) -> Result<f64, RateTableError> {
        let age = self.age();
        let year = self.month().year();
        let Some(engine) = self.cpf.as_mut() else {
            return Ok(0.0);
        };

        let month = engine.contribute(age, wage)?;
        if month.split.capped && self.history.cap_recorded_year != Some(year) {
            self.history.cap_recorded_year = Some(year);
            debug!(
                year,
                requested = month.requested,
                credited = month.split.total,
                "Annual contribution limit reached"
            );
            self.push_ledger(StateEvent::ContributionCapped {
                requested: month.requested,
                credited: month.split.total,
            });
        }
        Ok(month.split.employee)
    }

    /// Compound the portfolio for one month; returns the growth credited
    pub fn apply_growth(&mut self, annual_percent: f64) -> f64 {
        if self.portfolio.balance <= 0.0 {
            return 0.0;
        }
        let growth = round_money(self.portfolio.balance * annual_percent / 100.0 / 12.0);
        self.portfolio.balance = round_money(self.portfolio.balance + growth);
        growth
    }

    pub fn accrue_cpf_interest(&mut self) {
        let age = self.age();
        if let Some(engine) = self.cpf.as_mut() {
            engine.accrue_interest(age);
        }
    }

    /// Snapshot of the current month
    pub fn month_record(&self, income: f64, expenses: f64, growth: f64) -> MonthRecord {
        let month = self.month();
        let annuity = self.annuity_income();
        MonthRecord {
            index: self.timeline.index,
            year: month.year(),
            month: month.month(),
            age: self.fractional_age(),
            income,
            expenses,
            contributions: self.portfolio.contributions,
            portfolio_value: self.portfolio.balance,
            growth,
            cpf: self.cpf.as_ref().map(|engine| engine.accounts()),
            annuity_income: (annuity > 0.0).then_some(annuity),
        }
    }

    pub fn advance(&mut self) {
        self.timeline.index += 1;
    }
}
