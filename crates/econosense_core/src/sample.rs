//! Bundled sample dataset
//!
//! Monthly inflation (percent) for January through December 2023. This is
//! mock data used as the default forecasting input.

use crate::error::SeriesError;
use crate::model::{Period, TimeSeries};

/// First month of the sample
pub const SAMPLE_START: (i16, i8) = (2023, 1);

pub const SAMPLE_INFLATION: [f64; 12] = [
    25.6, 28.1, 30.5, 32.8, 35.0, 38.2, 40.5, 42.0, 43.8, 45.2, 47.5, 49.9,
];

pub fn sample_series() -> Result<TimeSeries, SeriesError> {
    let (year, month) = SAMPLE_START;
    TimeSeries::from_values(Period::new(year, month)?, &SAMPLE_INFLATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_covers_2023() {
        let series = sample_series().unwrap();
        assert_eq!(series.len(), 12);
        assert_eq!(series.first_period().unwrap().to_string(), "Jan-2023");
        assert_eq!(series.last_period().unwrap().to_string(), "Dec-2023");
    }
}
