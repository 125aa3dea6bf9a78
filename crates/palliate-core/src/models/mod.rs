pub mod calculator;
pub mod route;
