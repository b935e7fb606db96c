use std::num::IntErrorKind;

use crate::domain::{error::InputError, period::Period};

const DEFAULT_LIMIT: &str = "100";

/// Widget parameters as they arrive, before validation
#[derive(Debug, Default, Clone)]
pub struct RawQuery {
    pub kind: Option<String>,
    pub user: Option<String>,
    pub limit: Option<String>,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `type=recently`
    Recently,
    /// `type=frequently`, with the window to aggregate over
    Frequently(Period),
}

/// Validated widget request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetQuery {
    pub mode: Mode,
    pub user: String,
    pub limit: u64,
}

impl RawQuery {
    /// Only the presence of `type` and `user`. Callers check this before the
    /// API key, and the rest of the query after it.
    pub fn check_required(&self) -> Result<(), InputError> {
        match (present(&self.kind), present(&self.user)) {
            (Some(_), Some(_)) => Ok(()),
            _ => Err(InputError::MissingRequired),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Decimal digits only. Values too large for `u64` saturate.
fn parse_limit(limit: &str) -> Result<u64, InputError> {
    match limit.trim().parse::<u64>() {
        Ok(limit) => Ok(limit),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(u64::MAX),
        Err(_) => Err(InputError::InvalidLimit),
    }
}

impl TryFrom<RawQuery> for WidgetQuery {
    type Error = InputError;

    fn try_from(raw: RawQuery) -> Result<Self, Self::Error> {
        raw.check_required()?;
        let (Some(kind), Some(user)) = (raw.kind, raw.user) else {
            return Err(InputError::MissingRequired);
        };

        let limit = parse_limit(raw.limit.as_deref().unwrap_or(DEFAULT_LIMIT))?;

        let mode = match kind.as_str() {
            "recently" => Mode::Recently,
            "frequently" => {
                let period = match raw.period.as_deref() {
                    Some(period) => period.parse::<Period>()?,
                    None => Period::default(),
                };
                Mode::Frequently(period)
            }
            _ => return Err(InputError::InvalidType),
        };

        Ok(Self { mode, user, limit })
    }
}
