use crate::shared::api_utils::{get_json, send_empty, send_json, ApiError};
use contracts::domain::a002_program::aggregate::ProgramId;
use contracts::domain::a003_curriculum::{Curriculum, CurriculumRecord, CurriculumSummary, SaveRequest};
use gloo_net::http::Method;

/// All curricula known to the catalog
pub async fn fetch_directory() -> Result<Vec<CurriculumSummary>, ApiError> {
    get_json("/api/curricula").await
}

/// Curriculum of a program, normalized into the editor model.
/// `Ok(None)` when the program has no curriculum yet, whether the backend
/// answers 404 or a bare record.
pub async fn fetch_by_program(program_id: ProgramId) -> Result<Option<Curriculum>, ApiError> {
    match get_json::<CurriculumRecord>(&format!("/api/curricula/byProgramId/{}", program_id)).await {
        Ok(record) if record.is_placeholder() => Ok(None),
        Ok(record) => Ok(Some(Curriculum::from(record))),
        Err(ApiError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Create or update, depending on the request
pub async fn save(request: &SaveRequest) -> Result<(), ApiError> {
    match request {
        SaveRequest::Create(payload) => send_json(Method::POST, "/api/curricula", payload).await,
        SaveRequest::Update { id, payload } => {
            send_json(Method::PUT, &format!("/api/curricula/{}", id), payload).await
        }
    }
}

/// Delete the curriculum version attached to a program.
/// Returns `false` when there was nothing to delete.
pub async fn delete_for_program(program_id: ProgramId) -> Result<bool, ApiError> {
    let Some(curriculum) = fetch_by_program(program_id).await? else {
        return Ok(false);
    };
    let Some(id) = curriculum.curriculum_id else {
        return Ok(false);
    };
    send_empty(Method::DELETE, &format!("/api/curricula/{}", id)).await?;
    Ok(true)
}

/// Copy a program and its subject rows into a new program
pub async fn clone_program(program_id: ProgramId) -> Result<(), ApiError> {
    send_empty(Method::POST, &format!("/api/curricula/{}/clone", program_id)).await
}
