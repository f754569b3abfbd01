//! HTTP request handlers

pub mod classify;
pub mod health;
pub mod risk;
pub mod weather;

pub use classify::*;
pub use health::*;
pub use risk::*;
pub use weather::*;

use serde::Deserialize;
use shared::Language;

/// Query parameters shared by location-based endpoints
#[derive(Debug, Default, Deserialize)]
pub struct LocationQuery {
    /// `"city"` or `"city,country"`
    pub location: Option<String>,
    /// Label language code, Portuguese when absent
    pub lang: Option<String>,
}

impl LocationQuery {
    pub fn language(&self) -> Language {
        self.lang
            .as_deref()
            .map(Language::from_code)
            .unwrap_or_default()
    }
}
