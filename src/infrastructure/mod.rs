pub mod adapters;
pub mod audit;
pub mod config;
pub mod health;
