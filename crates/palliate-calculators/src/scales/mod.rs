pub mod ecog;
pub mod pps;
