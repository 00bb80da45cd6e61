//! Shared helpers

pub mod paths;
pub mod terminal;
pub mod tools;
