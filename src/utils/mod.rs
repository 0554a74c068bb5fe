//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// Interactive input helpers
pub mod input;

/// Verbose and diagnostic output helpers
pub mod logging;

/// Bounded retry policy for the command layer
pub mod retry;

/// Input validation and sanitization utilities
pub mod validation;
