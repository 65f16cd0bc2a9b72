use crate::models::{CreateProject, Project, UpdateProject};
use crate::services::projects;
use crate::web::error::ApiResult;
use crate::web::extractors::CurrentUser;
use crate::web::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use std::sync::Arc;

/// POST /p
pub async fn create(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CreateProject>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let project = projects::create_project(&state.db, user.id, &input)?;
    tracing::info!("user '{}' created project '{}'", user.slug, project.slug);
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /p
pub async fn list(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = projects::list_projects(&state.db, user.id)?;
    Ok(Json(projects))
}

/// GET /p/:id
pub async fn get(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Project>> {
    let project = projects::get_project(&state.db, id, user.id)?;
    Ok(Json(project))
}

/// GET /p/slug/:slug
pub async fn get_by_slug(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
) -> ApiResult<Json<Project>> {
    let project = projects::get_project_by_slug(&state.db, user.id, &slug)?;
    Ok(Json(project))
}

/// PATCH /p/:id
pub async fn update(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(input): Json<UpdateProject>,
) -> ApiResult<Json<Project>> {
    let project = projects::update_project(&state.db, id, user.id, &input)?;
    Ok(Json(project))
}

/// DELETE /p/:id
pub async fn remove(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Project>> {
    let project = projects::delete_project(&state.db, id, user.id)?;
    tracing::info!("user '{}' deleted project '{}'", user.slug, project.slug);
    Ok(Json(project))
}
