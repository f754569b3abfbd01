//! Business logic services for the NimbusVita advisory server

pub mod advisory;

pub use advisory::AdvisoryService;
