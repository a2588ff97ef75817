//! Structural analysis.

pub mod fem;
