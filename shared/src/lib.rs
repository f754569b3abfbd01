//! Shared types and risk logic for the NimbusVita advisory platform
//!
//! This crate is the pure computational core shared between the backend,
//! the browser (via WASM), and any other consumer. It performs no I/O:
//! raw readings come in, categories and risk assessments go out.

pub mod aggregator;
pub mod alerts;
pub mod classifier;
pub mod factors;
pub mod models;
pub mod normalize;
pub mod staleness;
pub mod thresholds;
pub mod types;
pub mod validation;

pub use aggregator::*;
pub use alerts::*;
pub use classifier::*;
pub use factors::*;
pub use models::*;
pub use normalize::*;
pub use staleness::*;
pub use thresholds::*;
pub use types::*;
pub use validation::*;
