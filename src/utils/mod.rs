//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `pollsub` application.
//!
//! This module centralizes reusable components, such as custom error types
//! and logging initialization, to promote code consistency and reduce
//! duplication.

pub mod error;
pub mod logging;
