//! Departments: read-only catalog list feeding the department selector.

pub mod api;
pub mod hooks;
