//! External reading sources

pub mod synthetic;
pub mod weather;

pub use synthetic::SyntheticSource;
pub use weather::OpenWeatherClient;
