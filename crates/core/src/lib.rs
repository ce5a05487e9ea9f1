pub mod config;
pub mod error;

pub use config::{Config, LengthUnit, Metric, SplitterStrategy};
pub use error::*;
