//! Infrastructure adapters. Implement outbound ports.
//!
//! Generative model, filesystem, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod persistence;
pub mod ui;
