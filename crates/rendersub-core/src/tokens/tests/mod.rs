//! Tests for token expansion
//!
//! Organized into focused submodules, one per concern.

use super::*;

// Test helper functions
mod helpers;
