//! Library exports for estate-admin, shared between the binary and tests.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod errors;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
