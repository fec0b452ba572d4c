//! Programs of the selected department.

pub mod api;
pub mod hooks;
