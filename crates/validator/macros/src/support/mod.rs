//! Internal support utilities for the derive macro.
//!
//! Attribute parsing, serde rename rules, diagnostics and small helpers for working with syn
//! types.

pub mod attrs;
pub mod case;
pub mod diag;
pub mod utils;
