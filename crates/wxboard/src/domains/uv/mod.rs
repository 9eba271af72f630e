pub mod download_uv;

pub use download_uv::*;
