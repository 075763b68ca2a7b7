pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod server;
