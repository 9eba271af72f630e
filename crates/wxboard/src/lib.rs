mod board;
mod coordinates;
mod domains;
mod error;
mod fetcher;
mod join;
pub mod models;
mod pipeline;
mod render;
mod scheduler;
mod timestamps;
mod units;
mod utils;

pub use board::*;
pub use coordinates::*;
pub use domains::*;
pub use error::*;
pub use fetcher::*;
pub use join::*;
pub use pipeline::*;
pub use render::*;
pub use scheduler::*;
pub use timestamps::*;
pub use units::*;
pub use utils::*;
