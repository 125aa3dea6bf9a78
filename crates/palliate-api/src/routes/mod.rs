pub mod calculators;
pub mod health;
pub mod opioids;
pub mod pain_ladder;
