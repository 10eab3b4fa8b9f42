pub mod cli;
pub mod config;
pub mod error;
pub mod parser2;
pub mod setup;
