mod client;
mod config;

pub use client::BalenaClient;
pub use config::BalenaConfig;
