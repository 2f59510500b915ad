pub mod config;
pub mod hooks;
pub mod shared;
pub mod workflow;
