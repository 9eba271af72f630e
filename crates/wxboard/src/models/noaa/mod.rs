pub mod forecast;
pub mod points;

pub use forecast::*;
pub use points::*;
