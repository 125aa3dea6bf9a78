//! Opioid dose conversion.
//!
//! Two converters live here. [`rotation`] normalizes a daily dose through
//! oral morphine equivalents (OME) using a per-drug potency table and then
//! applies a cross-tolerance reduction. [`equianalgesic`] looks up a direct
//! drug-and-route ratio from a curated pairwise table.

pub mod dose;
pub mod equianalgesic;
pub mod potency;
pub mod rotation;
