use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{DateRange, IsoDate};
use crate::ValidationError;

/// Symbolic relative period: whole years counted back from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "3y")]
    ThreeYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Period {
    pub const ALL: [Self; 4] = [
        Self::OneYear,
        Self::TwoYears,
        Self::ThreeYears,
        Self::FiveYears,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::ThreeYears => "3y",
            Self::FiveYears => "5y",
        }
    }

    /// Number of ≤365-day windows needed to cover the period.
    pub const fn years(self) -> i32 {
        match self {
            Self::OneYear => 1,
            Self::TwoYears => 2,
            Self::ThreeYears => 3,
            Self::FiveYears => 5,
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1y" => Ok(Self::OneYear),
            "2y" => Ok(Self::TwoYears),
            "3y" => Ok(Self::ThreeYears),
            "5y" => Ok(Self::FiveYears),
            other => Err(ValidationError::InvalidPeriod {
                value: other.to_owned(),
            }),
        }
    }
}

/// Requested span: either a symbolic period ending today or an explicit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodSpec {
    Relative(Period),
    Explicit(DateRange),
}

impl PeriodSpec {
    /// Resolve caller input into a spec. A symbolic period takes precedence
    /// over explicit dates when both are supplied; callers that care should
    /// surface that to the user before resolving (the CLI warns on stderr).
    pub fn from_parts(
        period: Option<Period>,
        start: Option<IsoDate>,
        end: Option<IsoDate>,
    ) -> Result<Self, ValidationError> {
        if let Some(period) = period {
            return Ok(Self::Relative(period));
        }

        match (start, end) {
            (Some(start), Some(end)) => Ok(Self::Explicit(DateRange::new(start, end)?)),
            _ => Err(ValidationError::MissingSpan),
        }
    }
}
