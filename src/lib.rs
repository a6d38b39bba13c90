//! camera-ipconfig library crate.
//!
//! This module exposes the internal components for integration testing.

pub mod assign;
pub mod cameras;
pub mod config;
pub mod utility;
