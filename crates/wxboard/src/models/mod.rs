pub mod epa;
pub mod mesonet;
pub mod noaa;
pub mod proxy;
