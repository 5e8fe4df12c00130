//! then-now: what facts, records and beliefs changed since your birth year.
//! Hexagonal layout: domain, ports, adapters, use cases.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
