//! Core engine — round lifecycle, wager validation and settlement.

pub mod registry;
pub mod settlement;
pub mod validator;

pub use registry::RoundRegistry;
