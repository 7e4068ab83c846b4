//! UI components.

pub mod heart;
