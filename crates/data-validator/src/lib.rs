//! Data Validation
//!
//! Plausibility checking and despiking for wearable vitals frames before
//! they reach storage and the emergency monitor.

mod error;
mod filter;
mod validator;

pub use error::ValidationError;
pub use filter::MedianFilter;
pub use validator::{ValidationConfig, ValidationResult, Validator};
