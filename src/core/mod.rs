//! Core Module - Probe sequencing

pub mod runner;
pub mod sign_in;

pub use runner::*;
pub use sign_in::*;
