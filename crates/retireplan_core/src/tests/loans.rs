//! Tests for loan amortization

use super::ms;
use crate::loans::{LoanSchedule, amortization_schedule, payment_for_month, total_interest};
use crate::model::Loan;

fn principal_repaid(loan: &Loan) -> f64 {
    amortization_schedule(loan)
        .iter()
        .map(|row| row.principal + row.extra_payment)
        .sum()
}

#[test]
fn test_schedule_repays_principal_exactly() {
    for loan in [
        Loan::new(100_000.0, 5.0, 360, ms(2025, 1)),
        Loan::new(25_000.0, 3.25, 60, ms(2024, 7)),
        Loan::new(9_999.99, 0.0, 7, ms(2025, 3)),
    ] {
        let schedule = amortization_schedule(&loan);
        assert_eq!(schedule.len(), loan.term_months as usize);
        assert_eq!(schedule.last().unwrap().balance, 0.0);
        assert!((principal_repaid(&loan) - loan.principal).abs() < 0.01);
    }
}

#[test]
fn test_extra_payment_shortens_schedule() {
    let loan = Loan::new(12_000.0, 0.0, 12, ms(2025, 1)).with_extra_payment(ms(2025, 2), 6_000.0);
    let schedule = amortization_schedule(&loan);

    assert_eq!(schedule.len(), 6);
    assert_eq!(schedule[1].total_outlay(), 7_000.0);
    assert_eq!(schedule[5].balance, 0.0);
    assert_eq!(payment_for_month(&loan, 2025, 2), 7_000.0);
    assert_eq!(payment_for_month(&loan, 2025, 6), 1_000.0);
    assert_eq!(payment_for_month(&loan, 2025, 7), 0.0);
    assert!((principal_repaid(&loan) - 12_000.0).abs() < 0.01);
}

#[test]
fn test_extra_payment_never_overshoots_balance() {
    let loan = Loan::new(3_000.0, 0.0, 3, ms(2025, 1)).with_extra_payment(ms(2025, 1), 50_000.0);
    let schedule = amortization_schedule(&loan);
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0].principal, 1_000.0);
    assert_eq!(schedule[0].extra_payment, 2_000.0);
    assert_eq!(schedule[0].balance, 0.0);
}

#[test]
fn test_extra_payments_reduce_total_interest() {
    let base = Loan::new(200_000.0, 4.0, 240, ms(2025, 1));
    let small = base.clone().with_extra_payment(ms(2026, 1), 10_000.0);
    let large = base.clone().with_extra_payment(ms(2026, 1), 50_000.0);

    let base_interest = total_interest(&amortization_schedule(&base));
    let small_interest = total_interest(&amortization_schedule(&small));
    let large_interest = total_interest(&amortization_schedule(&large));

    assert!(small_interest < base_interest);
    assert!(large_interest < small_interest);
    assert!(amortization_schedule(&large).len() < 240);
}

#[test]
fn test_schedule_lookup_by_month() {
    let loan = Loan::new(1_200.0, 0.0, 12, ms(2025, 1)).named("Laptop");
    let schedule = LoanSchedule::new(&loan);
    assert_eq!(schedule.name, "Laptop");
    assert!(schedule.row(ms(2024, 12)).is_none());
    assert_eq!(schedule.row(ms(2025, 12)).map(|r| r.payment_number), Some(12));
    assert!(schedule.is_final_month(ms(2025, 12)));
    assert_eq!(schedule.total_interest(), 0.0);
}

/// Test a fractional extra payment keeps the month's outlay cent-exact
#[test]
fn test_fractional_extra_payment_outlay_is_rounded() {
    let loan = Loan::new(100_000.0, 5.0, 360, ms(2025, 1)).with_extra_payment(ms(2025, 2), 100.1);

    assert_eq!(payment_for_month(&loan, 2025, 1), 536.82);
    assert_eq!(payment_for_month(&loan, 2025, 2), 636.92);

    let schedule = LoanSchedule::new(&loan);
    let outlay = schedule.outlay(ms(2025, 2));
    assert_eq!(outlay, (outlay * 100.0).round() / 100.0);
}
