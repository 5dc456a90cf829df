//! Database query implementations.

pub mod members;
pub mod projects;
