//! Tests for the depletion phase

use super::ms;
use crate::config::{ProjectionOptions, UserDataBuilder};
use crate::model::{CpfAccounts, RetirementExpense, StateEvent, UserData, WithdrawalStrategy};
use crate::simulation::{calculate, project, strategy_withdrawal};

fn options() -> ProjectionOptions {
    ProjectionOptions::anchored(ms(2025, 1))
}

fn retiree(savings: f64, strategy: WithdrawalStrategy) -> UserData {
    UserDataBuilder::new()
        .ages(60, 61)
        .savings(savings)
        .withdrawal(strategy)
        .build()
}

#[test]
fn test_strategy_amounts() {
    let fixed = WithdrawalStrategy::Fixed {
        monthly_amount: 1_500.0,
    };
    let percentage = WithdrawalStrategy::Percentage { annual_rate: 4.0 };
    let combined = WithdrawalStrategy::Combined {
        monthly_amount: 500.0,
        annual_rate: 6.0,
    };
    assert_eq!(strategy_withdrawal(&fixed, 100_000.0), 1_500.0);
    assert_eq!(strategy_withdrawal(&percentage, 300_000.0), 1_000.0);
    assert_eq!(strategy_withdrawal(&combined, 100_000.0), 1_000.0);
    assert_eq!(strategy_withdrawal(&percentage, -5_000.0), 0.0);
}

#[test]
fn test_depletion_on_exact_month() {
    let data = retiree(
        12_000.0,
        WithdrawalStrategy::Fixed {
            monthly_amount: 1_000.0,
        },
    );
    let result = calculate(&data, &options()).unwrap();

    assert_eq!(result.years_until_depletion, Some(1.0));
    assert_eq!(result.depletion_age, Some(62.0));
    assert!(result.sustainability_warning);
}

#[test]
fn test_partial_month_is_fractional() {
    let data = retiree(
        12_500.0,
        WithdrawalStrategy::Fixed {
            monthly_amount: 1_000.0,
        },
    );
    let projection = project(&data, &options()).unwrap();

    // 12 full withdrawals, then half of the 13th
    assert_eq!(projection.result.years_until_depletion, Some(1.04));
    assert_eq!(projection.result.depletion_age, Some(62.04));
    assert_eq!(projection.depletion.months, 13);

    let depleted = projection.ledger.last().unwrap();
    assert_eq!(depleted.month, ms(2027, 1));
    assert_eq!(
        depleted.event,
        StateEvent::Depleted {
            required: 1_000.0,
            available: 500.0,
            age: 62.04
        }
    );
}

#[test]
fn test_sustainable_plan_reaches_horizon() {
    let data = retiree(
        500_000.0,
        WithdrawalStrategy::Fixed {
            monthly_amount: 1_000.0,
        },
    );
    let projection = project(&data, &options()).unwrap();

    assert_eq!(projection.result.years_until_depletion, None);
    assert_eq!(projection.result.depletion_age, None);
    assert!(!projection.result.sustainability_warning);
    // 61 to 100
    assert_eq!(projection.depletion.months, 468);
    assert_eq!(projection.depletion.final_value, 32_000.0);
}

#[test]
fn test_search_is_capped() {
    let data = retiree(
        500_000.0,
        WithdrawalStrategy::Fixed {
            monthly_amount: 1_000.0,
        },
    );
    let projection = project(&data, &options().with_max_depletion_months(24)).unwrap();
    assert_eq!(projection.depletion.months, 24);
    assert_eq!(projection.depletion_series.len(), 24);
}

#[test]
fn test_modeled_expenses_override_smaller_strategy() {
    let data = UserDataBuilder::new()
        .ages(60, 61)
        .savings(12_000.0)
        .expense(RetirementExpense::new("Living", 1_000.0).between_ages(Some(61), None))
        .withdrawal(WithdrawalStrategy::Fixed {
            monthly_amount: 100.0,
        })
        .build();
    let result = calculate(&data, &options()).unwrap();

    assert_eq!(result.future_value, 12_000.0);
    assert_eq!(result.years_until_depletion, Some(1.0));
}

#[test]
fn test_balance_strictly_decreases_when_withdrawal_beats_growth() {
    let data = UserDataBuilder::new()
        .ages(60, 61)
        .savings(100_000.0)
        .expected_return(6.0)
        .withdrawal(WithdrawalStrategy::Fixed {
            monthly_amount: 1_500.0,
        })
        .build();
    let projection = project(&data, &options()).unwrap();

    let values: Vec<f64> = projection
        .depletion_series
        .iter()
        .map(|r| r.portfolio_value)
        .collect();
    assert!(values.len() > 2);
    for pair in values.windows(2) {
        assert!(pair[1] < pair[0], "{} -> {}", pair[0], pair[1]);
    }
    assert_eq!(*values.last().unwrap(), 0.0);
    assert!(projection.result.sustainability_warning);
}

#[test]
fn test_percentage_strategy_never_depletes() {
    let data = retiree(200_000.0, WithdrawalStrategy::Percentage { annual_rate: 4.0 });
    let result = calculate(&data, &options()).unwrap();
    assert_eq!(result.years_until_depletion, None);
}

#[test]
fn test_annuity_income_sustains_withdrawals() {
    let data = UserDataBuilder::new()
        .ages(64, 65)
        .savings(12_000.0)
        .withdrawal(WithdrawalStrategy::Fixed {
            monthly_amount: 1_000.0,
        })
        .cpf_balances(CpfAccounts {
            retirement: 213_000.0,
            ..Default::default()
        })
        .build();
    let projection = project(&data, &options()).unwrap();

    assert_eq!(projection.result.years_until_depletion, None);

    let started = projection
        .ledger
        .iter()
        .find(|e| matches!(e.event, StateEvent::AnnuityStarted { .. }))
        .unwrap();
    assert_eq!(started.index, 12);

    let first = projection.depletion_series[0];
    assert!(first.annuity_income.unwrap() > 1_630.0);
    assert_eq!(first.cpf.unwrap().retirement, 0.0);
    assert!(first.portfolio_value > 12_000.0);
}
