pub mod config;
pub mod error;
pub mod jobs;
pub mod pages;
pub mod telemetry;
pub mod voice;
