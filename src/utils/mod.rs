//! Utilities Module
//!
//! Common utilities used across the crate.

pub mod logging;
