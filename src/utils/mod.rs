//! Utils Module - Helper Functions & Shared Utilities

pub mod constants;
pub mod format;
pub mod report;

pub use constants::*;
pub use format::*;
pub use report::*;
