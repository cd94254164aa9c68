//! EconoSense command-line front end
//!
//! Loads inputs, calls the `econosense_core` engines and renders text or
//! JSON summaries. No plotting.

pub mod cli;
pub mod commands;
pub mod data;
pub mod logging;
pub mod report;
pub mod util;

pub use cli::Cli;
pub use commands::run;
pub use logging::init_logging;
