use tracing::debug;

use crate::cash_flows::{
    month_expenses, month_income, month_one_off_returns, month_one_time_expenses,
};
use crate::config::ProjectionOptions;
use crate::error::{CalculationError, RateTableError};
use crate::model::{
    AccumulationSummary, CalculationResult, DepletionSummary, Projection, RateTables, StateEvent,
    UserData, WithdrawalStrategy,
};
use crate::money::{round_money, round_two};
use crate::simulation_state::SimulationState;
use crate::validation::validate_user_data_with_tables;

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Highest age the accumulation phase may run to
const MAX_ACCUMULATION_AGE: u32 = 120;

/// Months in the accumulation phase.
///
/// Runs to the retirement age, or longer when an income stream with an
/// explicit end keeps paying past it.
pub fn accumulation_months(data: &UserData, options: &ProjectionOptions) -> u32 {
    let to_retirement = data.years_to_retirement() * 12;
    let cap = MAX_ACCUMULATION_AGE.saturating_sub(data.current_age) * 12;

    let last_income_end = data
        .income_sources
        .iter()
        .filter_map(|income| income.end_date)
        .map(|end| end.months_since(options.anchor))
        .max()
        .unwrap_or(0)
        .max(0) as u32;

    to_retirement.max(last_income_end).min(cap)
}

/// Months in the depletion search: up to the horizon age, never more than
/// `max_depletion_months`.
pub fn depletion_months(data: &UserData, options: &ProjectionOptions, accumulated: u32) -> u32 {
    let horizon = data.horizon_age() * 12;
    let elapsed = data.current_age * 12 + accumulated;
    horizon
        .saturating_sub(elapsed)
        .min(options.max_depletion_months)
}

/// Amount the strategy draws from `balance` this month
pub fn strategy_withdrawal(strategy: &WithdrawalStrategy, balance: f64) -> f64 {
    let percentage = |annual_rate: f64| round_money(balance.max(0.0) * annual_rate / 100.0 / 12.0);
    match *strategy {
        WithdrawalStrategy::Fixed { monthly_amount } => round_money(monthly_amount),
        WithdrawalStrategy::Percentage { annual_rate } => percentage(annual_rate),
        WithdrawalStrategy::Combined {
            monthly_amount,
            annual_rate,
        } => round_money(monthly_amount + percentage(annual_rate)),
    }
}

/// Run the working-years loop for `months` months
pub fn run_accumulation(
    state: &mut SimulationState,
    data: &UserData,
    months: u32,
) -> Result<AccumulationSummary, RateTableError> {
    for _ in 0..months {
        state.begin_month();

        let ctx = state.timeline.ctx;
        let index = state.timeline.index;
        let month = state.month();

        let (earned, wage) = month_income(&data.income_sources, &ctx, index);
        let lump_sums = month_one_off_returns(&data.one_off_returns, month);
        let annuity = state.annuity_income();
        let mut income = round_money(earned + lump_sums + annuity);

        let recurring = month_expenses(&data.expenses, &ctx, index);
        let one_time = month_one_time_expenses(&data.one_time_expenses, month);
        let loans = state.loan_outlays();
        let expenses = round_money(recurring + one_time + loans);

        let employee_share = state.contribute_cpf(wage)?;
        income = round_money(income - employee_share);

        let net = round_money(income - expenses);
        let portfolio = &mut state.portfolio;
        portfolio.balance = round_money(portfolio.balance + net);
        portfolio.contributions = round_money(portfolio.contributions + net.max(0.0));

        let growth = state.apply_growth(data.expected_return);
        state.accrue_cpf_interest();

        if state.history.record_series {
            let record = state.month_record(income, expenses, growth);
            state.history.accumulation.push(record);
        }
        state.advance();
    }

    let future_value = state.portfolio.balance;
    let total_contributions = state.portfolio.contributions;
    Ok(AccumulationSummary {
        months,
        future_value,
        total_contributions,
        investment_growth: round_money(future_value - total_contributions),
        cpf: state.cpf.as_ref().map(|engine| engine.accounts()),
    })
}

/// Run the retirement loop for at most `months` months, stopping the first
/// month the portfolio cannot cover the required withdrawal.
pub fn run_depletion(state: &mut SimulationState, data: &UserData, months: u32) -> DepletionSummary {
    let retirement_age = state.fractional_age();
    let strategy = data.retirement.withdrawal_strategy;

    for m in 0..months {
        state.begin_month();

        let ctx = state.timeline.ctx;
        let index = state.timeline.index;
        let month = state.month();

        let recurring = month_expenses(&data.expenses, &ctx, index);
        let one_time = month_one_time_expenses(&data.one_time_expenses, month);
        let loans = state.loan_outlays();
        let modeled = round_money(recurring + one_time + loans);
        let required = strategy_withdrawal(&strategy, state.portfolio.balance).max(modeled);

        let lump_sums = month_one_off_returns(&data.one_off_returns, month);
        let annuity = state.annuity_income();
        let available = round_money(state.portfolio.balance + lump_sums + annuity);

        if available < required {
            let covered = if required > 0.0 {
                available.max(0.0) / required
            } else {
                0.0
            };
            let years = round_two((m as f64 + covered) / 12.0);
            let age = round_two(retirement_age + years);
            debug!(age, required, available, "Portfolio depleted");
            state.push_ledger(StateEvent::Depleted {
                required,
                available,
                age,
            });

            state.portfolio.balance = 0.0;
            if state.history.record_series {
                let record = state.month_record(round_money(lump_sums + annuity), required, 0.0);
                state.history.depletion.push(record);
            }
            return DepletionSummary {
                months: m + 1,
                final_value: 0.0,
                years_until_depletion: Some(years),
                depletion_age: Some(age),
            };
        }

        state.portfolio.balance = round_money(available - required);
        let growth = state.apply_growth(data.expected_return);
        state.accrue_cpf_interest();

        if state.history.record_series {
            let record = state.month_record(round_money(lump_sums + annuity), required, growth);
            state.history.depletion.push(record);
        }
        state.advance();
    }

    DepletionSummary {
        months,
        final_value: state.portfolio.balance,
        years_until_depletion: None,
        depletion_age: None,
    }
}

/// `value` deflated to anchor-month money over `years`
pub fn inflation_adjusted(value: f64, inflation_percent: f64, years: f64) -> f64 {
    let factor = (1.0 + inflation_percent / 100.0).powf(years);
    if factor <= 0.0 {
        return value;
    }
    round_money(value / factor)
}

/// Project `data` with the given rate tables
pub fn project_with_tables(
    data: &UserData,
    options: &ProjectionOptions,
    tables: &RateTables,
) -> Result<Projection, CalculationError> {
    validate_user_data_with_tables(data, options.anchor, tables)?;

    let mut state = SimulationState::new(data, options, tables);

    let accumulation_len = accumulation_months(data, options);
    let accumulation = run_accumulation(&mut state, data, accumulation_len)?;
    state.push_ledger(StateEvent::RetirementStarted {
        portfolio_value: accumulation.future_value,
    });

    let depletion_len = depletion_months(data, options, accumulation_len);
    let depletion = run_depletion(&mut state, data, depletion_len);

    let years_to_retirement = round_two(accumulation_len as f64 / 12.0);
    let result = CalculationResult {
        future_value: accumulation.future_value,
        total_contributions: accumulation.total_contributions,
        investment_growth: accumulation.investment_growth,
        inflation_adjusted_value: inflation_adjusted(
            accumulation.future_value,
            data.inflation_rate,
            accumulation_len as f64 / 12.0,
        ),
        years_to_retirement,
        years_until_depletion: depletion.years_until_depletion,
        depletion_age: depletion.depletion_age,
        sustainability_warning: depletion.depleted(),
    };
    debug!(
        future_value = result.future_value,
        years_to_retirement,
        depleted = result.sustainability_warning,
        "Projection complete"
    );

    Ok(Projection {
        result,
        accumulation,
        depletion,
        accumulation_series: state.history.accumulation,
        depletion_series: state.history.depletion,
        ledger: state.history.ledger,
    })
}

/// Full projection with series and ledger.
///
/// Fails fast with every validation problem when `data` is invalid.
pub fn project(data: &UserData, options: &ProjectionOptions) -> Result<Projection, CalculationError> {
    project_with_tables(data, options, RateTables::current())
}

/// Summary result of a projection
pub fn calculate(
    data: &UserData,
    options: &ProjectionOptions,
) -> Result<CalculationResult, CalculationError> {
    let options = options.with_series(false);
    project(data, &options).map(|projection| projection.result)
}

/// Run independent projections, one per scenario, returning results in
/// input order.
pub fn compare_scenarios(
    scenarios: &[UserData],
    options: &ProjectionOptions,
) -> Vec<Result<CalculationResult, CalculationError>> {
    #[cfg(feature = "parallel")]
    {
        scenarios
            .par_iter()
            .map(|data| calculate(data, options))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        scenarios
            .iter()
            .map(|data| calculate(data, options))
            .collect()
    }
}
