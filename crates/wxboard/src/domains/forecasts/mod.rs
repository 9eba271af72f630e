pub mod download_forecast;

pub use download_forecast::*;
