//! Editor state machine for one curriculum editing session.
//!
//! Browsing → Viewing | Editing → Saving → Browsing, with failed saves and
//! failed validation returning to Editing. The draft is always a copy of
//! whatever was loaded, so leaving the editor never touches the viewed copy.

use contracts::domain::a001_department::aggregate::DepartmentId;
use contracts::domain::a003_curriculum::resize::ResizeOutcome;
use contracts::domain::a003_curriculum::{
    prepare_save, resolve_year_number, Curriculum, CurriculumField, ItemField, SaveRequest,
    ValidationErrors,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorPhase {
    #[default]
    Browsing,
    Viewing,
    Editing,
    Saving,
}

/// Why `begin_save` did not produce a request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaveBlocked {
    #[error("Nothing is being edited")]
    NotEditing,

    #[error("A save is already in progress")]
    AlreadySaving,

    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    pub phase: EditorPhase,
    /// Copy as loaded from the server
    pub viewing: Option<Curriculum>,
    /// Working copy; only present while editing or saving
    pub draft: Option<Curriculum>,
    pub errors: ValidationErrors,
    /// Server rejection of the last save attempt
    pub save_error: Option<String>,
}

impl EditorState {
    pub fn is_saving(&self) -> bool {
        self.phase == EditorPhase::Saving
    }

    pub fn is_editing(&self) -> bool {
        self.phase == EditorPhase::Editing
    }

    /// Open a curriculum read-only
    pub fn view(&mut self, curriculum: Curriculum) -> bool {
        if self.is_saving() {
            return false;
        }
        *self = Self {
            phase: EditorPhase::Viewing,
            viewing: Some(curriculum),
            ..Self::default()
        };
        true
    }

    /// Open a curriculum for editing on a private copy
    pub fn edit(&mut self, curriculum: Curriculum) -> bool {
        if self.is_saving() {
            return false;
        }
        *self = Self {
            phase: EditorPhase::Editing,
            draft: Some(curriculum.clone()),
            viewing: Some(curriculum),
            ..Self::default()
        };
        true
    }

    /// Switch from the read-only view to editing the same curriculum
    pub fn edit_viewed(&mut self) -> bool {
        match (self.phase, self.viewing.clone()) {
            (EditorPhase::Viewing, Some(curriculum)) => self.edit(curriculum),
            _ => false,
        }
    }

    /// Start a new curriculum, optionally pre-filled with a department
    pub fn create(&mut self, department_id: Option<DepartmentId>) -> bool {
        self.start_draft(Curriculum::new_shell(department_id))
    }

    /// Edit a curriculum that has no server copy yet
    pub fn start_draft(&mut self, curriculum: Curriculum) -> bool {
        if self.is_saving() {
            return false;
        }
        *self = Self {
            phase: EditorPhase::Editing,
            draft: Some(curriculum),
            ..Self::default()
        };
        true
    }

    /// Leave viewing/editing. Refused while a save is in flight.
    pub fn back(&mut self) -> bool {
        if self.is_saving() {
            return false;
        }
        *self = Self::default();
        true
    }

    /// Validate the draft and, if clean, enter `Saving` and hand out the
    /// request to send. Validation failures stay in `Editing` with the
    /// error map filled in.
    pub fn begin_save(&mut self) -> Result<SaveRequest, SaveBlocked> {
        if self.is_saving() {
            return Err(SaveBlocked::AlreadySaving);
        }
        let draft = match (self.phase, self.draft.as_ref()) {
            (EditorPhase::Editing, Some(draft)) => draft,
            _ => return Err(SaveBlocked::NotEditing),
        };

        match prepare_save(draft) {
            Ok(request) => {
                self.errors = ValidationErrors::default();
                self.save_error = None;
                self.phase = EditorPhase::Saving;
                Ok(request)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(SaveBlocked::Invalid(errors))
            }
        }
    }

    /// The local copy is discarded once the server has it
    pub fn save_succeeded(&mut self) {
        if self.is_saving() {
            *self = Self::default();
        }
    }

    /// Back to editing with the draft intact
    pub fn save_failed(&mut self, message: impl Into<String>) {
        if self.is_saving() {
            self.phase = EditorPhase::Editing;
            self.save_error = Some(message.into());
        }
    }

    // ========================================================================
    // Draft edits (ignored unless editing)
    // ========================================================================

    fn draft_mut(&mut self) -> Option<&mut Curriculum> {
        if self.is_editing() {
            self.draft.as_mut()
        } else {
            None
        }
    }

    pub fn set_program_code(&mut self, value: String) {
        if let Some(draft) = self.draft_mut() {
            draft.program_code = value;
            self.errors.clear_field(CurriculumField::ProgramCode);
        }
    }

    pub fn set_program_name(&mut self, value: String) {
        if let Some(draft) = self.draft_mut() {
            draft.program_name = value;
            self.errors.clear_field(CurriculumField::ProgramName);
        }
    }

    pub fn set_department(&mut self, department_id: Option<DepartmentId>) {
        if let Some(draft) = self.draft_mut() {
            draft.department_id = department_id;
            draft.department_name = None;
            self.errors.clear_field(CurriculumField::DepartmentId);
        }
    }

    pub fn set_version_name(&mut self, value: String) {
        if let Some(draft) = self.draft_mut() {
            let trimmed = value.trim();
            draft.version_name = if trimmed.is_empty() {
                None
            } else {
                Some(value)
            };
        }
    }

    pub fn set_effectivity_year(&mut self, value: &str) {
        if let Some(draft) = self.draft_mut() {
            draft.effectivity_year = value.trim().parse().ok();
        }
    }

    pub fn change_duration(&mut self, input: &str) -> Option<ResizeOutcome> {
        let draft = self.draft_mut()?;
        let years: Vec<Option<u32>> = draft.items.iter().map(resolve_year_number).collect();
        let outcome = draft.change_duration(input);
        let limit = draft.duration_in_years;

        if let (ResizeOutcome::Shrunk { .. }, Some(limit)) = (&outcome, limit) {
            // Surviving rows move up; their errors follow them.
            let dropped = years
                .iter()
                .enumerate()
                .filter(|(_, year)| matches!(year, Some(y) if *y > limit))
                .map(|(index, _)| index);
            for index in dropped.rev() {
                self.errors.forget_item(index);
            }
        }
        Some(outcome)
    }

    pub fn update_item(&mut self, index: usize, field: ItemField, value: String) {
        if let Some(draft) = self.draft_mut() {
            if draft.update_item(index, field, value) {
                self.errors.clear_item(index, field);
            }
        }
    }

    pub fn add_item(&mut self, year_label: &str, term: &str) -> Option<usize> {
        self.draft_mut().map(|d| d.add_item(year_label, term))
    }

    pub fn add_term(&mut self, year_label: &str) -> Option<usize> {
        self.draft_mut().map(|d| d.add_term(year_label))
    }

    pub fn remove_item(&mut self, index: usize) {
        if let Some(draft) = self.draft_mut() {
            if draft.remove_item(index).is_some() {
                self.errors.forget_item(index);
            }
        }
    }

    /// Drop a bucket by the year and term names shown in the edit grouping
    pub fn remove_bucket(&mut self, year_label: &str, term: &str) {
        let Some(draft) = self.draft_mut() else {
            return;
        };
        let removed = draft.bucket_indices(year_label, term);
        draft.remove_bucket(year_label, term);
        for index in removed.into_iter().rev() {
            self.errors.forget_item(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_curriculum::validation::{
        DEPARTMENT_REQUIRED, PROGRAM_CODE_REQUIRED, UNITS_NOT_NUMERIC,
    };
    use contracts::domain::a003_curriculum::{CurriculumId, CurriculumItem};

    fn row(year_label: &str, term: &str, units: &str) -> CurriculumItem {
        let mut item = CurriculumItem::blank(year_label, term);
        item.units = units.to_string();
        item
    }

    fn loaded() -> Curriculum {
        Curriculum {
            curriculum_id: Some(CurriculumId(7)),
            program_code: "BSN".into(),
            program_name: "Bachelor of Science in Nursing".into(),
            duration_in_years: Some(2),
            department_id: Some(DepartmentId(3)),
            items: vec![
                row("First Year", "First Term", "3"),
                row("Second Year", "First Term", "3"),
            ],
            ..Curriculum::default()
        }
    }

    fn editing() -> EditorState {
        let mut state = EditorState::default();
        assert!(state.edit(loaded()));
        state
    }

    #[test]
    fn test_view_then_back() {
        let mut state = EditorState::default();
        assert!(state.view(loaded()));
        assert_eq!(state.phase, EditorPhase::Viewing);
        assert!(state.draft.is_none());

        assert!(state.back());
        assert_eq!(state, EditorState::default());
    }

    #[test]
    fn test_edit_works_on_a_copy() {
        let mut state = editing();
        state.set_program_name("Changed".into());
        state.update_item(0, ItemField::SubjectCode, "NCM 100".into());

        let viewing = state.viewing.as_ref().unwrap();
        assert_eq!(viewing.program_name, "Bachelor of Science in Nursing");
        assert_eq!(viewing.items[0].subject_code, "");
        assert_eq!(state.draft.as_ref().unwrap().items[0].subject_code, "NCM 100");
    }

    #[test]
    fn test_edit_viewed() {
        let mut state = EditorState::default();
        assert!(!state.edit_viewed());

        state.view(loaded());
        assert!(state.edit_viewed());
        assert_eq!(state.phase, EditorPhase::Editing);
        assert_eq!(state.draft, state.viewing);
    }

    #[test]
    fn test_create_starts_from_shell() {
        let mut state = EditorState::default();
        state.create(Some(DepartmentId(5)));

        let draft = state.draft.as_ref().unwrap();
        assert!(draft.is_new);
        assert_eq!(draft.department_id, Some(DepartmentId(5)));
        assert!(draft.items.is_empty());
        assert!(state.viewing.is_none());
    }

    #[test]
    fn test_start_draft_for_program_without_curriculum() {
        let mut shell = Curriculum::new_shell(Some(DepartmentId(2)));
        shell.program_code = "BSA".into();
        shell.program_name = "Bachelor of Science in Accountancy".into();
        shell.change_duration("4");

        let mut state = EditorState::default();
        assert!(state.start_draft(shell));
        assert_eq!(state.phase, EditorPhase::Editing);

        match state.begin_save() {
            Ok(SaveRequest::Create(payload)) => assert_eq!(payload.items.len(), 4),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_save_requires_editing() {
        let mut state = EditorState::default();
        assert_eq!(state.begin_save(), Err(SaveBlocked::NotEditing));

        state.view(loaded());
        assert_eq!(state.begin_save(), Err(SaveBlocked::NotEditing));
    }

    #[test]
    fn test_validation_failure_stays_editing() {
        let mut state = EditorState::default();
        state.create(None);
        state.update_item(0, ItemField::Units, "ignored".into());
        state.add_item("First Year", "First Term");
        state.update_item(0, ItemField::Units, "abc".into());

        match state.begin_save() {
            Err(SaveBlocked::Invalid(errors)) => {
                assert_eq!(errors.field(CurriculumField::DepartmentId), Some(DEPARTMENT_REQUIRED));
                assert!(errors.items.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(state.phase, EditorPhase::Editing);
        assert!(state.errors.field(CurriculumField::DepartmentId).is_some());

        state.set_department(Some(DepartmentId(1)));
        assert!(state.errors.is_empty());

        assert!(matches!(state.begin_save(), Err(SaveBlocked::Invalid(_))));
        assert_eq!(
            state.errors.field(CurriculumField::ProgramCode),
            Some(PROGRAM_CODE_REQUIRED)
        );
    }

    #[test]
    fn test_row_errors_reported_together() {
        let mut state = editing();
        state.update_item(0, ItemField::Units, "abc".into());
        state.update_item(1, ItemField::Units, "xyz".into());

        assert!(state.begin_save().is_err());
        assert_eq!(state.errors.item(0, ItemField::Units), Some(UNITS_NOT_NUMERIC));
        assert_eq!(state.errors.item(1, ItemField::Units), Some(UNITS_NOT_NUMERIC));

        state.update_item(0, ItemField::Units, "3".into());
        assert!(state.errors.item(0, ItemField::Units).is_none());
        assert!(state.errors.item(1, ItemField::Units).is_some());
    }

    #[test]
    fn test_single_save_in_flight() {
        let mut state = editing();
        let request = state.begin_save().unwrap();
        assert!(request.is_update());
        assert_eq!(state.phase, EditorPhase::Saving);

        assert_eq!(state.begin_save(), Err(SaveBlocked::AlreadySaving));
        assert!(!state.back());
        assert!(!state.view(loaded()));

        // Edits are ignored until the save settles
        state.set_program_code("OTHER".into());
        assert_eq!(state.draft.as_ref().unwrap().program_code, "BSN");
    }

    #[test]
    fn test_failed_save_keeps_work() {
        let mut state = editing();
        state.set_program_name("Nursing (revised)".into());
        state.begin_save().unwrap();

        state.save_failed("Admin access required");
        assert_eq!(state.phase, EditorPhase::Editing);
        assert_eq!(state.save_error.as_deref(), Some("Admin access required"));
        assert_eq!(state.draft.as_ref().unwrap().program_name, "Nursing (revised)");

        // Retry clears the previous server message
        state.begin_save().unwrap();
        assert!(state.save_error.is_none());
    }

    #[test]
    fn test_successful_save_returns_to_browsing() {
        let mut state = editing();
        state.begin_save().unwrap();
        state.save_succeeded();
        assert_eq!(state, EditorState::default());
    }

    #[test]
    fn test_remove_item_shifts_row_errors() {
        let mut state = editing();
        state.add_item("Second Year", "Second Term");
        state.update_item(1, ItemField::Units, "x".into());
        state.update_item(2, ItemField::Units, "y".into());
        assert!(state.begin_save().is_err());

        state.remove_item(0);
        assert_eq!(state.errors.item(0, ItemField::Units), Some(UNITS_NOT_NUMERIC));
        assert_eq!(state.errors.item(1, ItemField::Units), Some(UNITS_NOT_NUMERIC));
        assert!(state.errors.item(2, ItemField::Units).is_none());

        state.remove_bucket("Second Year", "First Term");
        assert_eq!(state.draft.as_ref().unwrap().items.len(), 1);
        assert_eq!(state.errors.item(0, ItemField::Units), Some(UNITS_NOT_NUMERIC));
        assert!(state.errors.item(1, ItemField::Units).is_none());
    }

    #[test]
    fn test_shrink_keeps_errors_of_surviving_rows() {
        let mut state = EditorState::default();
        let mut curriculum = loaded();
        curriculum.items = vec![
            row("First Year", "First Term", "a"),
            row("Third Year", "First Term", "b"),
            row("Bridging", "Summer", "c"),
            row("Second Year", "First Term", "d"),
        ];
        state.edit(curriculum);
        assert!(state.begin_save().is_err());
        assert_eq!(state.errors.items.len(), 4);

        assert!(matches!(
            state.change_duration("2"),
            Some(ResizeOutcome::Shrunk { removed: 1 })
        ));
        let draft = state.draft.as_ref().unwrap();
        assert_eq!(draft.items.len(), 3);
        assert_eq!(draft.items[2].year_label, "Second Year");
        for index in 0..3 {
            assert_eq!(state.errors.item(index, ItemField::Units), Some(UNITS_NOT_NUMERIC));
        }
        assert!(state.errors.item(3, ItemField::Units).is_none());
    }

    #[test]
    fn test_remove_placeholder_bucket_shifts_row_errors() {
        let mut state = EditorState::default();
        let mut curriculum = loaded();
        curriculum.items = vec![row("", "", "x"), row("First Year", "First Term", "y")];
        state.edit(curriculum);
        assert!(state.begin_save().is_err());

        state.remove_bucket("Unknown Year", "Term");
        let draft = state.draft.as_ref().unwrap();
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].year_label, "First Year");
        assert_eq!(state.errors.item(0, ItemField::Units), Some(UNITS_NOT_NUMERIC));
        assert!(state.errors.item(1, ItemField::Units).is_none());
    }

    #[test]
    fn test_duration_change_through_editor() {
        let mut state = editing();
        assert!(matches!(
            state.change_duration("4"),
            Some(ResizeOutcome::Grown { .. })
        ));
        assert_eq!(state.draft.as_ref().unwrap().items.len(), 4);

        state.update_item(1, ItemField::Units, "oops".into());
        state.update_item(3, ItemField::Units, "bad".into());
        assert!(state.begin_save().is_err());
        assert!(matches!(
            state.change_duration("3"),
            Some(ResizeOutcome::Shrunk { removed: 1 })
        ));
        assert_eq!(state.errors.item(1, ItemField::Units), Some(UNITS_NOT_NUMERIC));
        assert!(state.errors.item(3, ItemField::Units).is_none());
        assert_eq!(state.draft.as_ref().unwrap().duration_in_years, Some(3));

        let mut browsing = EditorState::default();
        assert_eq!(browsing.change_duration("2"), None);
    }
}
