//! The complete input record for a projection

use serde::{Deserialize, Serialize};

use super::cpf::CpfConfig;
use super::expenses::{OneOffReturn, OneTimeExpense, RetirementExpense};
use super::income::IncomeStream;
use super::loans::Loan;

/// Horizon used when a document names none
pub const DEFAULT_HORIZON_AGE: u32 = 100;

/// How much is drawn from the portfolio each retired month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum WithdrawalStrategy {
    /// A fixed amount every month
    Fixed { monthly_amount: f64 },
    /// A percentage of the current balance per year, drawn monthly
    Percentage { annual_rate: f64 },
    /// The fixed amount plus the percentage draw
    Combined { monthly_amount: f64, annual_rate: f64 },
}

impl Default for WithdrawalStrategy {
    fn default() -> Self {
        WithdrawalStrategy::Fixed {
            monthly_amount: 0.0,
        }
    }
}

/// Post-retirement settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementConfig {
    #[serde(default)]
    pub withdrawal_strategy: WithdrawalStrategy,
    /// The depletion search stops at this age.
    ///
    /// When absent, `DEFAULT_HORIZON_AGE` or the retirement age, whichever
    /// is later.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_age: Option<u32>,
}

impl Default for RetirementConfig {
    fn default() -> Self {
        Self {
            withdrawal_strategy: WithdrawalStrategy::default(),
            horizon_age: None,
        }
    }
}

/// Everything a projection needs about one person
///
/// Rates are annual percentages (`6.0` = 6 %).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub current_age: u32,
    pub retirement_age: u32,
    #[serde(default)]
    pub current_savings: f64,
    #[serde(default)]
    pub expected_return: f64,
    #[serde(default)]
    pub inflation_rate: f64,
    #[serde(default)]
    pub income_sources: Vec<IncomeStream>,
    #[serde(default)]
    pub one_off_returns: Vec<OneOffReturn>,
    #[serde(default)]
    pub expenses: Vec<RetirementExpense>,
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub one_time_expenses: Vec<OneTimeExpense>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<CpfConfig>,
    #[serde(default)]
    pub retirement: RetirementConfig,
}

impl Default for UserData {
    fn default() -> Self {
        Self {
            current_age: 30,
            retirement_age: 65,
            current_savings: 0.0,
            expected_return: 0.0,
            inflation_rate: 0.0,
            income_sources: Vec::new(),
            one_off_returns: Vec::new(),
            expenses: Vec::new(),
            loans: Vec::new(),
            one_time_expenses: Vec::new(),
            cpf: None,
            retirement: RetirementConfig::default(),
        }
    }
}

impl UserData {
    /// The mandatory-savings configuration when the scheme is switched on
    pub fn active_cpf(&self) -> Option<&CpfConfig> {
        self.cpf.as_ref().filter(|c| c.enabled)
    }

    /// Age at which the depletion search stops
    pub fn horizon_age(&self) -> u32 {
        self.retirement
            .horizon_age
            .unwrap_or(DEFAULT_HORIZON_AGE.max(self.retirement_age))
    }

    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document_uses_defaults() {
        let data: UserData =
            serde_json::from_str(r#"{"currentAge":40,"retirementAge":60}"#).unwrap();
        assert_eq!(data.current_age, 40);
        assert!(data.income_sources.is_empty());
        assert_eq!(data.retirement.horizon_age, None);
        assert_eq!(data.horizon_age(), 100);
        assert!(data.active_cpf().is_none());
    }

    #[test]
    fn test_withdrawal_strategy_wire_form() {
        let strategy: WithdrawalStrategy =
            serde_json::from_str(r#"{"kind":"combined","monthlyAmount":1000,"annualRate":2}"#)
                .unwrap();
        assert_eq!(
            strategy,
            WithdrawalStrategy::Combined {
                monthly_amount: 1000.0,
                annual_rate: 2.0
            }
        );
    }

    #[test]
    fn test_horizon_follows_late_retirement() {
        let data: UserData =
            serde_json::from_str(r#"{"currentAge":90,"retirementAge":105}"#).unwrap();
        assert_eq!(data.horizon_age(), 105);

        let data: UserData = serde_json::from_str(
            r#"{"currentAge":90,"retirementAge":105,"retirement":{"horizonAge":110}}"#,
        )
        .unwrap();
        assert_eq!(data.horizon_age(), 110);
    }

    #[test]
    fn test_disabled_cpf_is_inactive() {
        let data: UserData = serde_json::from_str(
            r#"{"currentAge":40,"retirementAge":60,"cpf":{"enabled":false}}"#,
        )
        .unwrap();
        assert!(data.cpf.is_some());
        assert!(data.active_cpf().is_none());
    }
}
