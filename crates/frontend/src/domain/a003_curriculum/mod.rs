//! Curriculum catalog: directory, read-only view and the editor.

pub mod api;
pub mod ui;
