//! Models Module - Configuration, Errors & Wire Types

pub mod config;
pub mod errors;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
