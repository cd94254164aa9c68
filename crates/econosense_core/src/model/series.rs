//! Monthly periods and the validated time series fed to the forecaster

use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::{add_months, month_label, months_between, parse_month_label};
use crate::error::SeriesError;

/// A calendar month, stored as the first day of that month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period(Date);

impl Period {
    /// Month containing `date`
    #[must_use]
    pub fn containing(date: Date) -> Self {
        Period(date.first_of_month())
    }

    pub fn new(year: i16, month: i8) -> Result<Self, SeriesError> {
        Ok(Period(Date::new(year, month, 1)?))
    }

    pub fn parse(label: &str) -> Result<Self, SeriesError> {
        parse_month_label(label)
            .map(Period)
            .ok_or_else(|| SeriesError::UnparseablePeriod(label.to_string()))
    }

    #[must_use]
    pub fn date(self) -> Date {
        self.0
    }

    #[must_use]
    pub fn year(self) -> i16 {
        self.0.year()
    }

    #[must_use]
    pub fn month(self) -> i8 {
        self.0.month()
    }

    /// The period `n` months later (or earlier for negative `n`)
    pub fn offset(self, n: i32) -> Result<Self, SeriesError> {
        Ok(Period(add_months(self.0, n)?))
    }

    /// The following month
    pub fn next(self) -> Result<Self, SeriesError> {
        self.offset(1)
    }

    /// Signed number of months from `self` to `other`
    #[must_use]
    pub fn months_until(self, other: Period) -> i32 {
        months_between(self.0, other.0)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&month_label(self.0))
    }
}

impl FromStr for Period {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::parse(s)
    }
}

impl TryFrom<String> for Period {
    type Error = SeriesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Period::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

/// A single (period, value) observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub period: Period,
    pub value: f64,
}

/// An immutable, contiguous monthly series of finite values.
///
/// Construction guarantees that every period is exactly one month after its
/// predecessor. Whether the series is long enough for a given model order is
/// checked by the forecaster, not here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    observations: Vec<Observation>,
}

impl TimeSeries {
    pub fn new(observations: Vec<Observation>) -> Result<Self, SeriesError> {
        for obs in &observations {
            if !obs.value.is_finite() {
                return Err(SeriesError::NonFiniteValue {
                    period: obs.period,
                    value: obs.value,
                });
            }
        }

        for pair in observations.windows(2) {
            if pair[0].period.months_until(pair[1].period) != 1 {
                return Err(SeriesError::NotContiguous {
                    previous: pair[0].period,
                    next: pair[1].period,
                });
            }
        }

        Ok(Self { observations })
    }

    /// Build a series from consecutive values starting at `start`
    pub fn from_values(start: Period, values: &[f64]) -> Result<Self, SeriesError> {
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                Ok(Observation {
                    period: start.offset(i as i32)?,
                    value,
                })
            })
            .collect::<Result<Vec<_>, SeriesError>>()?;
        Self::new(observations)
    }

    /// Build a series from `(label, value)` pairs such as `("Jan-2023", 25.6)`
    pub fn from_labeled<S: AsRef<str>>(pairs: &[(S, f64)]) -> Result<Self, SeriesError> {
        let observations = pairs
            .iter()
            .map(|(label, value)| {
                Ok(Observation {
                    period: Period::parse(label.as_ref())?,
                    value: *value,
                })
            })
            .collect::<Result<Vec<_>, SeriesError>>()?;
        Self::new(observations)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|o| o.value)
    }

    #[must_use]
    pub fn first_period(&self) -> Option<Period> {
        self.observations.first().map(|o| o.period)
    }

    #[must_use]
    pub fn last_period(&self) -> Option<Period> {
        self.observations.last().map(|o| o.period)
    }
}

impl<'de> Deserialize<'de> for TimeSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let observations = Vec::<Observation>::deserialize(deserializer)?;
        TimeSeries::new(observations).map_err(serde::de::Error::custom)
    }
}
