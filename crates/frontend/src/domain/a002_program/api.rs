use crate::shared::api_utils::{get_json, ApiError};
use contracts::domain::a001_department::aggregate::DepartmentId;
use contracts::domain::a002_program::aggregate::Program;

/// Programs of one department
pub async fn fetch_programs(department_id: DepartmentId) -> Result<Vec<Program>, ApiError> {
    get_json(&format!("/api/programs?departmentId={}", department_id)).await
}
