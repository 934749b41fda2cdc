//! Income streams and their payment frequencies

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::date_math::MonthStamp;

/// How often an income amount is received
///
/// Unknown strings deserialize to `Unspecified`, which normalizes to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Every `custom_days` days
    Custom,
    #[default]
    Unspecified,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
            Frequency::Custom => "custom",
            Frequency::Unspecified => "unspecified",
        }
    }

    fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            "yearly" | "annually" | "annual" => Frequency::Yearly,
            "custom" => Frequency::Custom,
            _ => Frequency::Unspecified,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Frequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Frequency::parse_lenient).unwrap_or_default())
    }
}

/// A source of income active over a calendar-month window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStream {
    #[serde(default)]
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub frequency: Frequency,
    /// Day count for `Frequency::Custom`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_days: Option<f64>,
    pub start_date: MonthStamp,
    /// Exclusive; `None` is open-ended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<MonthStamp>,
    /// Counts as wage for mandatory-savings contributions
    #[serde(default)]
    pub cpf_eligible: bool,
}

impl IncomeStream {
    pub fn new(name: impl Into<String>, amount: f64, frequency: Frequency, start: MonthStamp) -> Self {
        Self {
            name: name.into(),
            amount,
            frequency,
            custom_days: None,
            start_date: start,
            end_date: None,
            cpf_eligible: false,
        }
    }

    pub fn monthly(name: impl Into<String>, amount: f64, start: MonthStamp) -> Self {
        Self::new(name, amount, Frequency::Monthly, start)
    }

    pub fn yearly(name: impl Into<String>, amount: f64, start: MonthStamp) -> Self {
        Self::new(name, amount, Frequency::Yearly, start)
    }

    pub fn every_n_days(name: impl Into<String>, amount: f64, days: f64, start: MonthStamp) -> Self {
        Self {
            custom_days: Some(days),
            ..Self::new(name, amount, Frequency::Custom, start)
        }
    }

    #[must_use]
    pub fn until(mut self, end: MonthStamp) -> Self {
        self.end_date = Some(end);
        self
    }

    #[must_use]
    pub fn cpf_eligible(mut self) -> Self {
        self.cpf_eligible = true;
        self
    }
}
