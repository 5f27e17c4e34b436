//! Replays customer arrival files against a simulated bank.

pub mod arrival;
pub mod input;
pub mod reporter;
pub mod scenario;
pub mod service;
pub mod summary;
pub mod workload;
