pub mod engine;
pub mod schedule;
