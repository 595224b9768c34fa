//! Core library components.
//!
//! This module contains the configuration model, validation, merge rules and
//! the secret distribution engine. Nothing here prints to the terminal.

pub mod constants;
pub mod dispatch;
pub mod domain;
pub mod env;
pub mod orchestrator;
pub mod payload;
pub mod report;
pub mod resolve;
pub mod schema;
pub mod store;
