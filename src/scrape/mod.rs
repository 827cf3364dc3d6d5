pub mod extractor;

pub use extractor::{default_readings, extract_forecast, DEFAULT_READINGS};
