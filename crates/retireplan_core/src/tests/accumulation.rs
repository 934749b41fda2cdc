//! Tests for the accumulation phase
//!
//! Expected values assume rounding to the cent after every step.

use super::ms;
use crate::config::{ProjectionOptions, UserDataBuilder};
use crate::model::{CpfAccounts, IncomeStream, Loan, RetirementExpense, StateEvent};
use crate::simulation::{calculate, project};

fn options() -> ProjectionOptions {
    ProjectionOptions::anchored(ms(2025, 1))
}

#[test]
fn test_idle_savings_stay_put() {
    let data = UserDataBuilder::new().ages(30, 31).savings(10_000.0).build();
    let result = calculate(&data, &options()).unwrap();

    assert_eq!(result.future_value, 10_000.0);
    assert_eq!(result.total_contributions, 10_000.0);
    assert_eq!(result.investment_growth, 0.0);
    assert_eq!(result.inflation_adjusted_value, 10_000.0);
    assert_eq!(result.years_to_retirement, 1.0);
}

#[test]
fn test_zero_rate_future_value_equals_contributions() {
    let data = UserDataBuilder::new()
        .ages(30, 40)
        .savings(5_000.0)
        .income(IncomeStream::monthly("Salary", 4_000.0, ms(2020, 1)))
        .expense(RetirementExpense::new("Living", 1_500.0))
        .build();
    let result = calculate(&data, &options()).unwrap();

    assert_eq!(result.future_value, 305_000.0);
    assert_eq!(result.future_value, result.total_contributions);
}

#[test]
fn test_monthly_compounding() {
    let data = UserDataBuilder::new()
        .ages(30, 31)
        .savings(12_000.0)
        .expected_return(12.0)
        .build();
    let result = calculate(&data, &options()).unwrap();

    // 12,000 * 1.01^12, give or take cent rounding
    assert!((result.future_value - 13_521.90).abs() < 0.05);
    assert_eq!(result.total_contributions, 12_000.0);
    assert_eq!(
        result.investment_growth,
        crate::money::round_money(result.future_value - 12_000.0)
    );
}

#[test]
fn test_withdrawals_do_not_count_as_contributions() {
    let data = UserDataBuilder::new()
        .ages(30, 31)
        .one_off_return(ms(2025, 6), 5_000.0, "Bonus")
        .one_time_expense(ms(2025, 9), 2_000.0, "Car repair")
        .build();
    let result = calculate(&data, &options()).unwrap();

    assert_eq!(result.future_value, 3_000.0);
    assert_eq!(result.total_contributions, 5_000.0);
    assert_eq!(result.investment_growth, -2_000.0);
}

#[test]
fn test_inflation_adjusted_value() {
    let data = UserDataBuilder::new()
        .ages(30, 32)
        .savings(10_000.0)
        .inflation(10.0)
        .build();
    let result = calculate(&data, &options()).unwrap();
    // 10,000 / 1.1^2
    assert_eq!(result.inflation_adjusted_value, 8_264.46);
}

#[test]
fn test_loan_payments_reduce_savings() {
    let data = UserDataBuilder::new()
        .ages(30, 31)
        .income(IncomeStream::monthly("Salary", 2_000.0, ms(2025, 1)))
        .loan(Loan::new(12_000.0, 0.0, 12, ms(2025, 1)).named("Car"))
        .build();
    let projection = project(&data, &options()).unwrap();

    assert_eq!(projection.result.future_value, 12_000.0);
    assert_eq!(projection.accumulation_series[0].expenses, 1_000.0);
    let paid_off = projection
        .ledger
        .iter()
        .find(|e| matches!(e.event, StateEvent::LoanPaidOff { .. }))
        .unwrap();
    assert_eq!(paid_off.month, ms(2025, 12));
}

#[test]
fn test_income_past_retirement_extends_accumulation() {
    let data = UserDataBuilder::new()
        .ages(30, 31)
        .income(IncomeStream::monthly("Consulting", 1_000.0, ms(2025, 1)).until(ms(2027, 1)))
        .build();
    let result = calculate(&data, &options()).unwrap();

    assert_eq!(result.years_to_retirement, 2.0);
    assert_eq!(result.future_value, 24_000.0);
}

#[test]
fn test_employee_share_leaves_take_home_pay() {
    let data = UserDataBuilder::new()
        .ages(30, 31)
        .income(IncomeStream::monthly("Salary", 5_000.0, ms(2025, 1)).cpf_eligible())
        .expense(RetirementExpense::new("Living", 1_500.0))
        .cpf_enabled()
        .build();
    let projection = project(&data, &options()).unwrap();

    // 5,000 - 1,000 employee share - 1,500 expenses, for 12 months
    assert_eq!(projection.result.future_value, 30_000.0);
    assert_eq!(projection.accumulation_series[0].income, 4_000.0);
    let cpf = projection.accumulation.cpf.unwrap();
    assert!(cpf.total() > 22_200.0);
    assert_eq!(cpf.retirement, 0.0);
}

#[test]
fn test_transition_fires_once_at_fifty_five() {
    let data = UserDataBuilder::new()
        .ages(54, 57)
        .cpf_balances(CpfAccounts {
            ordinary: 200_000.0,
            special: 100_000.0,
            ..Default::default()
        })
        .build();
    let projection = project(&data, &options()).unwrap();

    let transitions: Vec<_> = projection
        .ledger
        .iter()
        .filter(|e| matches!(e.event, StateEvent::CpfTransition(_)))
        .collect();
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].index, 12);

    if let StateEvent::CpfTransition(outcome) = &transitions[0].event {
        let before = outcome.before.ordinary + outcome.before.special + outcome.before.retirement;
        let after = outcome.after.ordinary + outcome.after.retirement;
        assert!((before - after).abs() < 0.01);
        assert_eq!(outcome.after.retirement, 213_000.0);
    }

    let series = &projection.accumulation_series;
    assert!(series[11].cpf.unwrap().special > 100_000.0);
    for record in &series[12..] {
        assert_eq!(record.cpf.unwrap().special, 0.0);
    }
}

#[test]
fn test_series_recorded_on_request() {
    let data = UserDataBuilder::new().ages(30, 32).savings(1_000.0).build();

    let full = project(&data, &options()).unwrap();
    assert_eq!(full.accumulation_series.len(), 24);
    assert_eq!(full.accumulation_series[13].year, 2026);
    assert_eq!(full.accumulation_series[13].month, 2);
    assert_eq!(full.accumulation_series[13].age, 31.08);

    let bare = project(&data, &options().with_series(false)).unwrap();
    assert!(bare.accumulation_series.is_empty());
    assert_eq!(bare.result, full.result);
}

#[test]
fn test_projection_is_reproducible() {
    let data = UserDataBuilder::new()
        .ages(35, 60)
        .savings(40_000.0)
        .expected_return(6.5)
        .inflation(2.0)
        .income(IncomeStream::monthly("Salary", 7_000.0, ms(2024, 1)).cpf_eligible())
        .expense(RetirementExpense::new("Living", 3_000.0).inflating(2.0))
        .loan(Loan::new(300_000.0, 3.5, 300, ms(2025, 6)).housing().funded_by_cpf(None))
        .cpf_enabled()
        .build();
    let first = project(&data, &options()).unwrap();
    let second = project(&data, &options()).unwrap();
    assert_eq!(first, second);
}
