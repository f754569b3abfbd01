//! Domain models for the NimbusVita advisory platform

mod category;
mod risk;
mod weather;

pub use category::*;
pub use risk::*;
pub use weather::*;
