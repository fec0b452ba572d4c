use serde::Deserialize;

use crate::domain::a001_department::aggregate::{Department, DepartmentId};
use crate::domain::common::aggregate_id::numeric_id;
use crate::domain::common::lenient;

// ============================================================================
// ID Type
// ============================================================================

numeric_id!(
    /// Academic program identifier
    ProgramId
);

// ============================================================================
// Aggregate
// ============================================================================

/// Academic program, normalized from whichever department shape the
/// backend sent (nested object or flat `departmentId`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ProgramWire")]
pub struct Program {
    pub id: ProgramId,
    pub name: String,
    pub code: String,
    /// Nominal length of study; drives year seeding in the editor
    pub duration_in_years: Option<u32>,
    pub department_id: Option<DepartmentId>,
    pub department_name: Option<String>,
}

impl Program {
    /// Code if the backend provided one, otherwise the name
    pub fn code_or_name(&self) -> &str {
        if self.code.trim().is_empty() {
            &self.name
        } else {
            &self.code
        }
    }

    pub fn belongs_to(&self, department_id: DepartmentId) -> bool {
        self.department_id == Some(department_id)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgramWire {
    id: ProgramId,
    #[serde(default, deserialize_with = "lenient::text")]
    name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    code: String,
    #[serde(default, deserialize_with = "lenient::positive_int")]
    duration_in_years: Option<u32>,
    #[serde(default)]
    department_id: Option<DepartmentId>,
    #[serde(default)]
    department: Option<Department>,
}

impl From<ProgramWire> for Program {
    fn from(w: ProgramWire) -> Self {
        let department_id = w.department_id.or(w.department.as_ref().map(|d| d.id));
        let department_name = w.department.map(|d| d.name).filter(|n| !n.trim().is_empty());
        Self {
            id: w.id,
            name: w.name,
            code: w.code,
            duration_in_years: w.duration_in_years,
            department_id,
            department_name,
        }
    }
}
