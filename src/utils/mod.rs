//! Utility functions shared across layers.
//!
//! - [`alias_generator`] - Random alias generation and reserved aliases
//! - [`db_error`] - Database error classification

pub mod alias_generator;
pub mod db_error;
