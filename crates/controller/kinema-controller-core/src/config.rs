//! Sizing configuration for the controller data model.
//!
//! The original editor kept these as process-wide constants; here they
//! are an explicit value handed to constructors so hosts can size the
//! model per project.

use serde::{Deserialize, Serialize};

/// Capacities and length caps for schemas and mappings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of declared runtime inputs.
    pub max_inputs: usize,
    /// Maximum number of declared constants.
    pub max_constants: usize,
    /// Byte cap for input, constant, slot, and set names.
    pub max_name_len: usize,
    /// Byte cap for clip resource paths.
    pub max_path_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_inputs: 64,
            max_constants: 64,
            max_name_len: 64,
            max_path_len: 512,
        }
    }
}
