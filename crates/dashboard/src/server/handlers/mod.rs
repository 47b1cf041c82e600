//! HTTP handlers

pub mod dashboard;
pub mod status;
