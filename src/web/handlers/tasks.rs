use crate::models::{CreateTask, Task, TaskWithContext, UpdateTask};
use crate::services::tasks;
use crate::web::error::ApiResult;
use crate::web::extractors::CurrentUser;
use crate::web::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use std::sync::Arc;

/// POST /p/:projectSlug/f/:featureSlug/t
pub async fn create(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((project_slug, feature_slug)): Path<(String, String)>,
    Json(input): Json<CreateTask>,
) -> ApiResult<(StatusCode, Json<TaskWithContext>)> {
    let task = tasks::create_task(&state.db, user.id, &project_slug, &feature_slug, &input)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /p/:projectSlug/f/:featureSlug/t
pub async fn list(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((project_slug, feature_slug)): Path<(String, String)>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = tasks::list_tasks(&state.db, user.id, &project_slug, &feature_slug)?;
    Ok(Json(tasks))
}

/// GET /p/:projectSlug/f/:featureSlug/t/:taskSlug
pub async fn get(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((project_slug, feature_slug, task_slug)): Path<(String, String, String)>,
) -> ApiResult<Json<TaskWithContext>> {
    let task = tasks::get_task(&state.db, user.id, &project_slug, &feature_slug, &task_slug)?;
    Ok(Json(task))
}

/// PATCH /p/:projectSlug/f/:featureSlug/t/:taskSlug
pub async fn update(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((project_slug, feature_slug, task_slug)): Path<(String, String, String)>,
    Json(input): Json<UpdateTask>,
) -> ApiResult<Json<TaskWithContext>> {
    let task = tasks::update_task(
        &state.db,
        user.id,
        &project_slug,
        &feature_slug,
        &task_slug,
        &input,
    )?;
    Ok(Json(task))
}

/// DELETE /p/:projectSlug/f/:featureSlug/t/:taskSlug
pub async fn remove(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((project_slug, feature_slug, task_slug)): Path<(String, String, String)>,
) -> ApiResult<Json<TaskWithContext>> {
    let task = tasks::delete_task(
        &state.db,
        user.id,
        &project_slug,
        &feature_slug,
        &task_slug,
    )?;
    Ok(Json(task))
}
