//! Curriculum details UI module
//!
//! MVVM split:
//! - state.rs: editor state machine (pure, tested without a browser)
//! - view_model.rs: signals and commands (load, save)
//! - view.rs: edit form
//! - summary.rs: read-only view

pub mod state;
mod summary;
mod view;
mod view_model;

pub use summary::CurriculumSummaryView;
pub use view::CurriculumEditor;
pub use view_model::{CurriculumEditorViewModel, OpenMode};
