//! Curriculum editing core
//!
//! - aggregate.rs: canonical curriculum tree and point edits
//! - year.rs: year number resolution and label formatting
//! - resize.rs: duration-driven add/remove of year buckets
//! - grouping.rs: year → term → subject views (edit and summary orderings)
//! - validation.rs: pre-submission checks and payload normalization
//! - wire.rs: backend record/payload shapes and boundary conversions

pub mod aggregate;
pub mod grouping;
pub mod resize;
pub mod validation;
pub mod wire;
pub mod year;

pub use aggregate::{Curriculum, CurriculumField, CurriculumId, CurriculumItem, ItemField};
pub use grouping::{group_for_edit, group_for_summary, TermGroup, YearGroup};
pub use resize::{apply_duration_change, parse_duration_input, DurationChange, ResizeOutcome};
pub use validation::{prepare_save, validate, SaveRequest, ValidationErrors};
pub use wire::{CurriculumItemPayload, CurriculumPayload, CurriculumRecord, CurriculumSummary};
pub use year::{resolve_year_number, year_label_for};
