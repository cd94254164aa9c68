//! Input data: the bundled sample series and YAML files on disk

pub mod scenario;

pub use econosense_core::sample::sample_series;
pub use scenario::{
    DataError, load_scenario, load_series, scenario_from_yaml, scenario_to_yaml,
    series_from_yaml,
};
