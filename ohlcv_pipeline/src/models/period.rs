use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeriodError {
    #[error("Invalid period: {input}")]
    InvalidInput { input: String },
}

/// Sampling period for the aggregation stage.
///
/// Daily is the provider granularity; Weekly and Monthly are produced by
/// resampling daily bars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    /// Parses a period from user input, case-insensitively.
    ///
    /// Accepts `d`/`day`/`daily`, `w`/`week`/`weekly`, `m`/`mo`/`month`/`monthly`.
    pub fn parse(input: &str) -> Result<Self, PeriodError> {
        match input.trim().to_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Period::Daily),
            "w" | "wk" | "week" | "weekly" => Ok(Period::Weekly),
            "m" | "mo" | "month" | "monthly" => Ok(Period::Monthly),
            _ => Err(PeriodError::InvalidInput {
                input: input.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }
}
