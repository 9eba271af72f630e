pub mod forecasts;
pub mod observations;
pub mod uv;

pub use forecasts::*;
pub use observations::*;
pub use uv::*;
