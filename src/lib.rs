//! Time-bounded resource lending with strategy-driven cost computation.
//!
//! The crate covers three instantiations of the same core: library
//! circulation with overdue fines, ride dispatch with fare strategies, and
//! course grading with weighted rollups. Services are composed through
//! per-module factories and talk to in-memory repositories.

pub mod core;
pub mod utils;
pub mod gateway;
pub mod catalog;
pub mod members;
pub mod loans;
pub mod pricing;
pub mod rides;
pub mod grading;
