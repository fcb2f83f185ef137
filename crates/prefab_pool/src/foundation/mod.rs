//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Collections and handle types
//! - Logging utilities

pub mod collections;
pub mod logging;
