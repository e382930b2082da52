//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, StatutoryConstants};

/// Shared application state.
///
/// Holds the statutory table, read-only and shared by every request.
#[derive(Clone)]
pub struct AppState {
    constants: Arc<StatutoryConstants>,
}

impl AppState {
    /// Creates a new application state around a statutory table.
    pub fn new(constants: StatutoryConstants) -> Self {
        Self {
            constants: Arc::new(constants),
        }
    }

    /// Returns the statutory table.
    pub fn constants(&self) -> &StatutoryConstants {
        &self.constants
    }
}

impl From<ConfigLoader> for AppState {
    fn from(loader: ConfigLoader) -> Self {
        Self::new(loader.into_constants())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_table() {
        let state = AppState::new(StatutoryConstants::morocco());
        let clone = state.clone();
        assert!(std::ptr::eq(state.constants(), clone.constants()));
    }

    #[test]
    fn test_from_loader() {
        let loader = ConfigLoader::load("./config/morocco").expect("Failed to load config");
        let state = AppState::from(loader);
        assert_eq!(state.constants().metadata.version, "2025-01");
    }
}
