mod cpf;
mod expenses;
mod income;
mod loans;
mod rate_tables;
mod results;
mod state_event;
mod user_data;

pub use cpf::{
    AnnuityPlan, ContributionSplit, CpfAccounts, CpfConfig, InterestBreakdown, RetirementSumTier,
    TransitionOutcome,
};
pub use expenses::{
    ActivationWindow, ExpenseRecord, OneOffReturn, OneTimeExpense, RetirementExpense,
};
pub use income::{Frequency, IncomeStream};
pub use loans::{ExtraPayment, Loan, LoanCategory, PaymentBreakdown};
pub use rate_tables::{
    AllocationBracket, AnnuityRules, BaseInterestRates, CPF_2025, ContributionBracket,
    ExtraInterestRules, PayoutRange, RateTables,
};
pub use results::{
    AccumulationSummary, CalculationResult, DepletionSummary, MonthRecord, Projection,
};
pub use state_event::{LedgerEntry, StateEvent};
pub use user_data::{DEFAULT_HORIZON_AGE, RetirementConfig, UserData, WithdrawalStrategy};
