use std::collections::BTreeMap;

use serde::Serialize;

use super::aggregate::{Curriculum, CurriculumField, CurriculumId, ItemField};
use super::wire::CurriculumPayload;
use crate::domain::a001_department::aggregate::DepartmentId;

// ============================================================================
// Error map
// ============================================================================

/// Validation errors keyed by field, plus per-row errors keyed by row
/// position. Serializes as `{ field: msg, items: { index: { field: msg } } }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationErrors {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub items: BTreeMap<usize, BTreeMap<String, String>>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.items.is_empty()
    }

    pub fn set_field(&mut self, field: CurriculumField, message: impl Into<String>) {
        self.fields.insert(field.key().to_string(), message.into());
    }

    pub fn set_item(&mut self, index: usize, field: ItemField, message: impl Into<String>) {
        self.items
            .entry(index)
            .or_default()
            .insert(field.key().to_string(), message.into());
    }

    pub fn field(&self, field: CurriculumField) -> Option<&str> {
        self.fields.get(field.key()).map(String::as_str)
    }

    pub fn item(&self, index: usize, field: ItemField) -> Option<&str> {
        self.items
            .get(&index)
            .and_then(|m| m.get(field.key()))
            .map(String::as_str)
    }

    /// Drop the error of a field the administrator just edited
    pub fn clear_field(&mut self, field: CurriculumField) {
        self.fields.remove(field.key());
    }

    pub fn clear_item(&mut self, index: usize, field: ItemField) {
        if let Some(errors) = self.items.get_mut(&index) {
            errors.remove(field.key());
            if errors.is_empty() {
                self.items.remove(&index);
            }
        }
    }

    /// Keep row errors attached to the right rows after `index` was removed
    pub fn forget_item(&mut self, index: usize) {
        self.items = std::mem::take(&mut self.items)
            .into_iter()
            .filter(|(i, _)| *i != index)
            .map(|(i, errors)| if i > index { (i - 1, errors) } else { (i, errors) })
            .collect();
    }

    /// First message, for a compact banner
    pub fn first_message(&self) -> Option<&str> {
        self.fields
            .values()
            .chain(self.items.values().flat_map(|m| m.values()))
            .map(String::as_str)
            .next()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row_errors: usize = self.items.values().map(BTreeMap::len).sum();
        write!(
            f,
            "{} field error(s), {} row error(s)",
            self.fields.len(),
            row_errors
        )
    }
}

// ============================================================================
// Checks
// ============================================================================

pub const DEPARTMENT_REQUIRED: &str = "Department is required";
pub const PROGRAM_CODE_REQUIRED: &str = "Program code is required";
pub const PROGRAM_NAME_REQUIRED: &str = "Program name is required";
pub const UNITS_NOT_NUMERIC: &str = "Units must be a number";

/// Run the pre-submission checks.
///
/// Department, program code and program name are checked in that order and
/// the first failure stops validation. Row units are checked only when those
/// pass, and every bad row is reported in one pass.
pub fn validate(curriculum: &Curriculum) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if curriculum.department_id.is_none() {
        errors.set_field(CurriculumField::DepartmentId, DEPARTMENT_REQUIRED);
        return Err(errors);
    }
    if curriculum.program_code.trim().is_empty() {
        errors.set_field(CurriculumField::ProgramCode, PROGRAM_CODE_REQUIRED);
        return Err(errors);
    }
    if curriculum.program_name.trim().is_empty() {
        errors.set_field(CurriculumField::ProgramName, PROGRAM_NAME_REQUIRED);
        return Err(errors);
    }

    for (index, item) in curriculum.items.iter().enumerate() {
        if item.has_units() && item.units_value().is_none() {
            errors.set_item(index, ItemField::Units, UNITS_NOT_NUMERIC);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// Save request
// ============================================================================

/// Normalized request handed to the catalog API
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    Create(CurriculumPayload),
    Update {
        id: CurriculumId,
        payload: CurriculumPayload,
    },
}

impl SaveRequest {
    pub fn payload(&self) -> &CurriculumPayload {
        match self {
            SaveRequest::Create(payload) => payload,
            SaveRequest::Update { payload, .. } => payload,
        }
    }

    /// Department whose program list must be refreshed after success
    pub fn department_id(&self) -> DepartmentId {
        self.payload().department.id
    }

    pub fn is_update(&self) -> bool {
        matches!(self, SaveRequest::Update { .. })
    }
}

/// Validate and, if clean, build the wire request: create when no
/// curriculum id is known, update otherwise.
pub fn prepare_save(curriculum: &Curriculum) -> Result<SaveRequest, ValidationErrors> {
    validate(curriculum)?;

    let Some(department_id) = curriculum.department_id else {
        let mut errors = ValidationErrors::default();
        errors.set_field(CurriculumField::DepartmentId, DEPARTMENT_REQUIRED);
        return Err(errors);
    };

    let payload = CurriculumPayload::from_curriculum(curriculum, department_id);
    Ok(match curriculum.curriculum_id {
        Some(id) => SaveRequest::Update { id, payload },
        None => SaveRequest::Create(payload),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_curriculum::aggregate::CurriculumItem;
    use serde_json::json;

    fn valid() -> Curriculum {
        Curriculum {
            department_id: Some(DepartmentId(1)),
            program_code: "BSIT".into(),
            program_name: "Bachelor of Science in Information Technology".into(),
            duration_in_years: Some(4),
            ..Curriculum::default()
        }
    }

    fn with_units(units: &[&str]) -> Vec<CurriculumItem> {
        units
            .iter()
            .map(|u| CurriculumItem {
                year_label: "First Year".into(),
                term: "First Term".into(),
                units: u.to_string(),
                ..CurriculumItem::default()
            })
            .collect()
    }

    #[test]
    fn test_structural_checks_short_circuit() {
        let mut c = valid();
        c.department_id = None;
        c.program_code = " ".into();
        c.items = with_units(&["abc", "xyz"]);

        let errors = validate(&c).unwrap_err();
        assert_eq!(errors.field(CurriculumField::DepartmentId), Some(DEPARTMENT_REQUIRED));
        assert_eq!(errors.fields.len(), 1);
        assert!(errors.items.is_empty());
    }

    #[test]
    fn test_check_order() {
        let mut c = valid();
        c.program_code = "".into();
        c.program_name = "".into();
        let errors = validate(&c).unwrap_err();
        assert_eq!(errors.field(CurriculumField::ProgramCode), Some(PROGRAM_CODE_REQUIRED));
        assert_eq!(errors.field(CurriculumField::ProgramName), None);

        c.program_code = "BSIT".into();
        let errors = validate(&c).unwrap_err();
        assert_eq!(errors.field(CurriculumField::ProgramName), Some(PROGRAM_NAME_REQUIRED));
    }

    #[test]
    fn test_item_checks_batch() {
        let mut c = valid();
        c.items = with_units(&["abc", "3", "xyz", ""]);
        let errors = validate(&c).unwrap_err();
        assert!(errors.fields.is_empty());
        assert_eq!(errors.items.len(), 2);
        assert_eq!(errors.item(0, ItemField::Units), Some(UNITS_NOT_NUMERIC));
        assert_eq!(errors.item(2, ItemField::Units), Some(UNITS_NOT_NUMERIC));
        assert_eq!(errors.item(1, ItemField::Units), None);
    }

    #[test]
    fn test_error_map_shape() {
        let mut errors = ValidationErrors::default();
        errors.set_field(CurriculumField::ProgramName, "x");
        errors.set_item(1, ItemField::Units, "y");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "programName": "x", "items": { "1": { "units": "y" } } })
        );
    }

    #[test]
    fn test_clear_and_forget() {
        let mut errors = ValidationErrors::default();
        errors.set_field(CurriculumField::ProgramCode, "x");
        errors.set_item(0, ItemField::Units, "a");
        errors.set_item(2, ItemField::Units, "b");
        errors.set_item(3, ItemField::Units, "c");

        errors.clear_field(CurriculumField::ProgramCode);
        errors.clear_item(0, ItemField::Units);
        assert!(errors.fields.is_empty());
        assert!(!errors.items.contains_key(&0));

        errors.forget_item(2);
        assert_eq!(errors.item(2, ItemField::Units), Some("c"));
        assert_eq!(errors.items.len(), 1);
    }

    #[test]
    fn test_prepare_save_create_vs_update() {
        let c = valid();
        assert!(matches!(prepare_save(&c), Ok(SaveRequest::Create(_))));

        let mut c = valid();
        c.curriculum_id = Some(CurriculumId(12));
        match prepare_save(&c).unwrap() {
            SaveRequest::Update { id, payload } => {
                assert_eq!(id, CurriculumId(12));
                assert_eq!(payload.department.id, DepartmentId(1));
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn test_prepare_save_blocks_on_errors() {
        let mut c = valid();
        c.items = with_units(&["three"]);
        let errors = prepare_save(&c).unwrap_err();
        assert_eq!(errors.item(0, ItemField::Units), Some(UNITS_NOT_NUMERIC));
    }
}
