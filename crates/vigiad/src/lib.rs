//! Vigia gateway daemon library - exposes modules for testing.

pub mod classifier;
pub mod config;
pub mod evaluator;
pub mod routes;
pub mod server;
pub mod trace_id;
