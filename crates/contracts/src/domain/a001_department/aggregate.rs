use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_id::numeric_id;
use crate::domain::common::lenient;

// ============================================================================
// ID Type
// ============================================================================

numeric_id!(
    /// Department identifier
    DepartmentId
);

// ============================================================================
// Aggregate
// ============================================================================

/// Academic department. Read-only from the editor's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
}

impl Department {
    /// Label for selectors; falls back to the id when the name is blank
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Department #{}", self.id)
        } else {
            self.name.clone()
        }
    }
}

/// Nested `{ "id": .. }` reference expected by save payloads
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepartmentRef {
    pub id: DepartmentId,
}

impl From<DepartmentId> for DepartmentRef {
    fn from(id: DepartmentId) -> Self {
        Self { id }
    }
}
