use crate::shared::api_utils::{get_json, ApiError};
use contracts::domain::a001_department::aggregate::Department;

pub async fn fetch_departments() -> Result<Vec<Department>, ApiError> {
    get_json("/api/departments").await
}
