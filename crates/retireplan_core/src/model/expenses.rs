//! Recurring expenses and one-off cash events
//!
//! Expenses arrive in a flat wire format that carries either calendar-date
//! bounds or age bounds. On load the record is converted into a tagged
//! `ActivationWindow`, and the normalizer dispatches on the tag.

use serde::{Deserialize, Serialize};

use crate::date_math::MonthStamp;
use crate::error::RecordError;

/// When an expense is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationWindow {
    /// Calendar months; `end` is exclusive
    Dates {
        start: Option<MonthStamp>,
        end: Option<MonthStamp>,
    },
    /// Whole years of age; `end` is exclusive
    Ages { start: Option<u32>, end: Option<u32> },
}

impl Default for ActivationWindow {
    fn default() -> Self {
        ActivationWindow::Dates {
            start: None,
            end: None,
        }
    }
}

/// A recurring monthly expense that grows with its own inflation rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExpenseRecord", into = "ExpenseRecord")]
pub struct RetirementExpense {
    pub name: String,
    pub monthly_amount: f64,
    /// Percent per year, compounded from the expense's own start
    pub inflation_rate: f64,
    pub window: ActivationWindow,
}

impl RetirementExpense {
    pub fn new(name: impl Into<String>, monthly_amount: f64) -> Self {
        Self {
            name: name.into(),
            monthly_amount,
            inflation_rate: 0.0,
            window: ActivationWindow::default(),
        }
    }

    #[must_use]
    pub fn inflating(mut self, percent: f64) -> Self {
        self.inflation_rate = percent;
        self
    }

    #[must_use]
    pub fn between_dates(mut self, start: Option<MonthStamp>, end: Option<MonthStamp>) -> Self {
        self.window = ActivationWindow::Dates { start, end };
        self
    }

    #[must_use]
    pub fn between_ages(mut self, start: Option<u32>, end: Option<u32>) -> Self {
        self.window = ActivationWindow::Ages { start, end };
        self
    }
}

/// Flat wire form of `RetirementExpense`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    #[serde(default)]
    pub name: String,
    pub monthly_amount: f64,
    #[serde(default)]
    pub inflation_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<MonthStamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<MonthStamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_age: Option<u32>,
}

impl TryFrom<ExpenseRecord> for RetirementExpense {
    type Error = RecordError;

    fn try_from(record: ExpenseRecord) -> Result<Self, Self::Error> {
        let has_dates = record.start_date.is_some() || record.end_date.is_some();
        let has_ages = record.start_age.is_some() || record.end_age.is_some();

        let window = match (has_dates, has_ages) {
            (true, true) => {
                return Err(RecordError::MixedActivationWindow { name: record.name });
            }
            (false, true) => ActivationWindow::Ages {
                start: record.start_age,
                end: record.end_age,
            },
            _ => ActivationWindow::Dates {
                start: record.start_date,
                end: record.end_date,
            },
        };

        Ok(RetirementExpense {
            name: record.name,
            monthly_amount: record.monthly_amount,
            inflation_rate: record.inflation_rate,
            window,
        })
    }
}

impl From<RetirementExpense> for ExpenseRecord {
    fn from(expense: RetirementExpense) -> Self {
        let mut record = ExpenseRecord {
            name: expense.name,
            monthly_amount: expense.monthly_amount,
            inflation_rate: expense.inflation_rate,
            ..Default::default()
        };
        match expense.window {
            ActivationWindow::Dates { start, end } => {
                record.start_date = start;
                record.end_date = end;
            }
            ActivationWindow::Ages { start, end } => {
                record.start_age = start;
                record.end_age = end;
            }
        }
        record
    }
}

/// A single dated inflow (bonus, inheritance, asset sale)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneOffReturn {
    pub date: MonthStamp,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

/// A single dated outflow (wedding, car, renovation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeExpense {
    pub date: MonthStamp,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_record_becomes_date_window() {
        let expense: RetirementExpense = serde_json::from_str(
            r#"{"name":"Rent","monthlyAmount":1500,"inflationRate":2,"startDate":"2025-01","endDate":"2030-01"}"#,
        )
        .unwrap();
        assert_eq!(
            expense.window,
            ActivationWindow::Dates {
                start: Some(MonthStamp::new(2025, 1).unwrap()),
                end: Some(MonthStamp::new(2030, 1).unwrap()),
            }
        );
    }

    #[test]
    fn test_age_record_becomes_age_window() {
        let expense: RetirementExpense =
            serde_json::from_str(r#"{"name":"Travel","monthlyAmount":800,"startAge":65,"endAge":80}"#)
                .unwrap();
        assert_eq!(
            expense.window,
            ActivationWindow::Ages {
                start: Some(65),
                end: Some(80)
            }
        );
        assert_eq!(expense.inflation_rate, 0.0);
    }

    #[test]
    fn test_unbounded_record_is_always_active() {
        let expense: RetirementExpense =
            serde_json::from_str(r#"{"monthlyAmount":2000}"#).unwrap();
        assert_eq!(expense.window, ActivationWindow::default());
    }

    #[test]
    fn test_mixed_record_is_rejected() {
        let err = serde_json::from_str::<RetirementExpense>(
            r#"{"name":"Odd","monthlyAmount":10,"startDate":"2025-01","endAge":70}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("mixes calendar-date and age bounds"));
    }

    #[test]
    fn test_serializes_back_to_flat_form() {
        let expense = RetirementExpense::new("Care", 300.0).between_ages(Some(80), None);
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["startAge"], 80);
        assert!(json.get("endAge").is_none());
        assert!(json.get("startDate").is_none());
    }
}
