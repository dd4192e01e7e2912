pub mod config;
pub mod error;
pub mod events;
pub mod fetch;
pub mod generator;
pub mod ics;
pub mod types;
pub mod utils;
