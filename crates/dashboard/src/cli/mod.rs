//! Command-line client for a running dashboard server

pub mod client;
pub mod commands;
pub mod display;
