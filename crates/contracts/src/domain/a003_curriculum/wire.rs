//! Backend shapes for curricula and the conversions at the load and save
//! boundaries. Nothing ambiguous crosses into the canonical model.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::aggregate::{Curriculum, CurriculumId, CurriculumItem};
use super::year::{resolve_year_number, year_label_for};
use crate::domain::a001_department::aggregate::{Department, DepartmentId, DepartmentRef};
use crate::domain::a002_program::aggregate::ProgramId;
use crate::domain::common::lenient;

// ============================================================================
// Inbound
// ============================================================================

/// Subject row as returned by `GET /api/curricula/byProgramId/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumItemRecord {
    #[serde(default, deserialize_with = "lenient::positive_int")]
    pub year: Option<u32>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub year_label: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub semester: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub term_title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub subject_code: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub prerequisite: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub equiv_subject_code: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::units_text")]
    pub units: String,
}

impl From<CurriculumItemRecord> for CurriculumItem {
    fn from(r: CurriculumItemRecord) -> Self {
        let term = if !r.semester.trim().is_empty() {
            r.semester
        } else {
            r.term_title
        };
        let year_label = match r.year {
            Some(year) if r.year_label.trim().is_empty() => year_label_for(year),
            _ => r.year_label,
        };
        Self {
            year: r.year,
            year_label,
            term,
            subject_code: r.subject_code,
            prerequisite: r.prerequisite,
            equiv_subject_code: r.equiv_subject_code,
            description: r.description,
            units: r.units,
        }
    }
}

/// Program block nested in a curriculum record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramStub {
    #[serde(default)]
    pub id: Option<ProgramId>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::positive_int")]
    pub duration_in_years: Option<u32>,
}

/// Curriculum record as returned by the backend
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumRecord {
    #[serde(default)]
    pub curriculum_id: Option<CurriculumId>,
    #[serde(default)]
    pub id: Option<CurriculumId>,
    #[serde(default)]
    pub program_id: Option<ProgramId>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub program_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub program_code: String,
    #[serde(default, deserialize_with = "lenient::positive_int")]
    pub duration_in_years: Option<u32>,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub program: Option<ProgramStub>,
    #[serde(default)]
    pub curriculum_version_name: Option<String>,
    #[serde(default)]
    pub effectivity_year: Option<i32>,
    #[serde(default)]
    pub items: Vec<CurriculumItemRecord>,
}

impl CurriculumRecord {
    /// A program without a curriculum is answered with a bare record: no id
    /// and no rows.
    pub fn is_placeholder(&self) -> bool {
        self.curriculum_id.or(self.id).is_none() && self.items.is_empty()
    }
}

impl From<CurriculumRecord> for Curriculum {
    fn from(r: CurriculumRecord) -> Self {
        let program = r.program.unwrap_or_default();
        let program_name = if r.program_name.trim().is_empty() {
            program.name.clone()
        } else {
            r.program_name
        };
        let program_code = if r.program_code.trim().is_empty() {
            program_name.clone()
        } else {
            r.program_code
        };
        let department_id = r.department_id.or(r.department.as_ref().map(|d| d.id));
        let department_name = r
            .department
            .map(|d| d.name)
            .filter(|n| !n.trim().is_empty());

        Self {
            curriculum_id: r.curriculum_id.or(r.id),
            program_id: r.program_id.or(program.id),
            program_code,
            program_name,
            duration_in_years: r.duration_in_years.or(program.duration_in_years),
            department_id,
            department_name,
            version_name: r.curriculum_version_name,
            effectivity_year: r.effectivity_year,
            items: r.items.into_iter().map(CurriculumItem::from).collect(),
            is_new: false,
        }
    }
}

/// Directory entry from `GET /api/curricula`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumSummary {
    pub program_id: ProgramId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub program_name: String,
    #[serde(default, deserialize_with = "lenient::positive_int")]
    pub duration_in_years: Option<u32>,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub items_count: usize,
}

impl CurriculumSummary {
    pub fn department_name(&self) -> &str {
        self.department.as_ref().map(|d| d.name.as_str()).unwrap_or("")
    }
}

// ============================================================================
// Outbound
// ============================================================================

/// Subject row as sent on create/update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumItemPayload {
    pub year: Option<u32>,
    pub year_label: String,
    pub semester: String,
    pub term_title: String,
    pub subject_code: String,
    pub prerequisite: String,
    pub equiv_subject_code: String,
    pub description: String,
    pub units: Option<Number>,
}

impl From<&CurriculumItem> for CurriculumItemPayload {
    fn from(item: &CurriculumItem) -> Self {
        Self {
            year: resolve_year_number(item),
            year_label: item.year_label.clone(),
            semester: item.term.clone(),
            term_title: item.term.clone(),
            subject_code: item.subject_code.clone(),
            prerequisite: item.prerequisite.clone(),
            equiv_subject_code: item.equiv_subject_code.clone(),
            description: item.description.clone(),
            units: units_number(&item.units),
        }
    }
}

/// Units text to a JSON number: blank or non-numeric → `None`, integral
/// values as integers.
pub fn units_number(text: &str) -> Option<Number> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(Number::from(int));
    }
    let value = trimmed.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(Number::from(value as i64))
    } else {
        Number::from_f64(value)
    }
}

/// Create/update body for `/api/curricula`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<ProgramId>,
    pub program_code: String,
    pub program_name: String,
    pub duration_in_years: Option<u32>,
    pub department: DepartmentRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curriculum_version_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effectivity_year: Option<i32>,
    pub items: Vec<CurriculumItemPayload>,
}

impl CurriculumPayload {
    pub fn from_curriculum(curriculum: &Curriculum, department_id: DepartmentId) -> Self {
        Self {
            program_id: curriculum.program_id,
            program_code: curriculum.program_code.trim().to_string(),
            program_name: curriculum.program_name.trim().to_string(),
            duration_in_years: curriculum.duration_in_years,
            department: DepartmentRef::from(department_id),
            curriculum_version_name: curriculum.version_name.clone(),
            effectivity_year: curriculum.effectivity_year,
            items: curriculum.items.iter().map(CurriculumItemPayload::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_curriculum::validation::prepare_save;
    use serde_json::json;

    fn server_record() -> serde_json::Value {
        json!({
            "program": { "id": 4, "name": "BSIT", "durationInYears": 4 },
            "department": { "id": 2, "name": "College of Computer Studies" },
            "programId": 4,
            "programName": "BSIT",
            "programCode": "BSIT",
            "durationInYears": 4,
            "departmentId": 2,
            "curriculumId": 9,
            "curriculumVersionName": "Imported - initial",
            "effectivityYear": 2024,
            "items": [
                {
                    "id": 100,
                    "subjectCode": "CSIT121",
                    "description": "Fundamentals of Programming",
                    "equivSubjectCode": "CSIT121",
                    "prerequisite": null,
                    "semester": "First Term",
                    "termTitle": "First Term",
                    "units": 3,
                    "year": 1,
                    "yearLabel": "First Year"
                },
                {
                    "subjectCode": "CSIT112",
                    "semester": "",
                    "termTitle": "Second Term",
                    "units": null,
                    "year": null,
                    "yearLabel": "Unknown Year"
                },
                {
                    "subjectCode": "GE-IT1",
                    "termTitle": null,
                    "units": "3",
                    "year": 2
                }
            ]
        })
    }

    #[test]
    fn test_record_to_canonical() {
        let record: CurriculumRecord = serde_json::from_value(server_record()).unwrap();
        let c = Curriculum::from(record);

        assert_eq!(c.curriculum_id, Some(CurriculumId(9)));
        assert_eq!(c.program_id, Some(ProgramId(4)));
        assert_eq!(c.department_id, Some(DepartmentId(2)));
        assert_eq!(c.department_name.as_deref(), Some("College of Computer Studies"));
        assert_eq!(c.duration_in_years, Some(4));
        assert!(!c.is_new);
        assert!(c.is_update());

        assert_eq!(c.items[0].term, "First Term");
        assert_eq!(c.items[0].units, "3");
        assert_eq!(c.items[0].prerequisite, "");
        assert_eq!(c.items[1].term, "Second Term");
        assert_eq!(c.items[1].units, "");
        assert_eq!(c.items[1].year, None);
        assert_eq!(c.items[2].year_label, "Second Year");
        assert_eq!(c.items[2].term, "");
    }

    #[test]
    fn test_record_falls_back_to_nested_program() {
        let record: CurriculumRecord = serde_json::from_value(json!({
            "program": { "id": 5, "name": "BSCS", "durationInYears": 4 },
            "department": { "id": 3, "name": "CCS" },
            "items": []
        }))
        .unwrap();
        let c = Curriculum::from(record);
        assert_eq!(c.program_id, Some(ProgramId(5)));
        assert_eq!(c.program_name, "BSCS");
        assert_eq!(c.program_code, "BSCS");
        assert_eq!(c.duration_in_years, Some(4));
        assert_eq!(c.department_id, Some(DepartmentId(3)));
        assert_eq!(c.curriculum_id, None);
    }

    #[test]
    fn test_placeholder_record() {
        let bare: CurriculumRecord = serde_json::from_value(json!({
            "programId": 5,
            "programName": "BSCS",
            "items": []
        }))
        .unwrap();
        assert!(bare.is_placeholder());

        let saved: CurriculumRecord = serde_json::from_value(json!({
            "curriculumId": 9,
            "items": []
        }))
        .unwrap();
        assert!(!saved.is_placeholder());

        let record: CurriculumRecord = serde_json::from_value(server_record()).unwrap();
        assert!(!record.is_placeholder());
    }

    #[test]
    fn test_units_normalization() {
        assert_eq!(units_number(""), None);
        assert_eq!(units_number("  "), None);
        assert_eq!(units_number("3"), Some(Number::from(3)));
        assert_eq!(units_number("3.0"), Some(Number::from(3)));
        assert_eq!(units_number("1.5"), Number::from_f64(1.5));
        assert_eq!(units_number("abc"), None);
    }

    #[test]
    fn test_payload_shape() {
        let record: CurriculumRecord = serde_json::from_value(server_record()).unwrap();
        let mut c = Curriculum::from(record);
        c.items[1].units = "".into();
        c.items[2].units = "3".into();

        let request = prepare_save(&c).unwrap();
        assert!(request.is_update());
        let value = serde_json::to_value(request.payload()).unwrap();

        assert_eq!(value["department"], json!({ "id": 2 }));
        assert_eq!(value["programId"], json!(4));
        assert_eq!(value["items"][1]["units"], json!(null));
        assert_eq!(value["items"][2]["units"], json!(3));
        assert_eq!(value["items"][0]["semester"], json!("First Term"));
        assert_eq!(value["items"][0]["termTitle"], json!("First Term"));
        assert_eq!(value["items"][0]["year"], json!(1));
        assert_eq!(value["items"][1]["year"], json!(null));
    }

    #[test]
    fn test_summary_list() {
        let list: Vec<CurriculumSummary> = serde_json::from_value(json!([
            { "programId": 1, "programName": "BSIT", "durationInYears": 4,
              "department": { "id": 2, "name": "CCS" }, "itemsCount": 42 },
            { "programId": 2, "programName": "BSCS", "durationInYears": null, "itemsCount": 0 }
        ]))
        .unwrap();
        assert_eq!(list[0].items_count, 42);
        assert_eq!(list[0].department_name(), "CCS");
        assert_eq!(list[1].duration_in_years, None);
        assert_eq!(list[1].department_name(), "");
    }
}
