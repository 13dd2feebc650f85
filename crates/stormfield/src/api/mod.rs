pub mod config;
pub mod storm;
