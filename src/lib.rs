pub mod aggregator;
pub mod config;
pub mod error;
pub mod input;
pub mod oracle;
pub mod report;
pub mod sampler;
pub mod tour;
// cmd is a binary module (main.rs); the console loop is tested there.
