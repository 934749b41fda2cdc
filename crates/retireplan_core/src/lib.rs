//! Retirement projection library
//!
//! This crate projects a person's savings month by month from today to
//! retirement and then through retirement until the portfolio runs out or a
//! horizon age is reached. It covers:
//! - Income and expense normalization (frequencies, activation windows, inflation)
//! - Loan amortization with extra payments
//! - The tiered mandatory-savings scheme (CPF): contributions, interest and the
//!   one-time age-55 account transition
//! - Lifetime annuity payout estimation
//! - Accumulation and depletion simulation with a lifecycle ledger
//!
//! Every run is a pure function of its `UserData` input and a caller-supplied
//! anchor month; the wall clock is never consulted.
//!
//! # Builder DSL
//!
//! ```ignore
//! use retireplan_core::config::{ProjectionOptions, UserDataBuilder};
//! use retireplan_core::date_math::MonthStamp;
//! use retireplan_core::model::IncomeStream;
//!
//! let data = UserDataBuilder::new()
//!     .ages(30, 65)
//!     .savings(50_000.0)
//!     .expected_return(6.0)
//!     .income(IncomeStream::monthly("Salary", 5_000.0, MonthStamp::new(2025, 1)?).cpf_eligible())
//!     .cpf_enabled()
//!     .build();
//!
//! let result = retireplan_core::calculate(&data, &ProjectionOptions::anchored(MonthStamp::new(2025, 1)?))?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod annuity;
pub mod cash_flows;
pub mod cpf;
pub mod date_math;
pub mod error;
pub mod loans;
pub mod money;
pub mod simulation;
pub mod simulation_state;
pub mod validation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{ProjectionOptions, UserDataBuilder};
pub use error::CalculationError;
pub use simulation::{calculate, compare_scenarios, project};
