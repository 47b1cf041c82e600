//! Lead and meeting analytics for the agent dashboard
//!
//! Contacts come from a spreadsheet and meetings from a calendar. Every
//! dashboard request reads both sources afresh and aggregates them in
//! memory; nothing is stored.

pub mod aggregation;
pub mod cli;
pub mod clock;
pub mod config;
pub mod dates;
pub mod error;
pub mod providers;
pub mod records;
pub mod server;
pub mod service;
