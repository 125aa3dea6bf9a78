//! palliate-core
//!
//! Shared vocabulary of the Palliate system: calculator records as they are
//! stored and served, administration routes, and catalog key conventions.
//! No calculation logic lives here.

pub mod error;
pub mod keys;
pub mod models;
