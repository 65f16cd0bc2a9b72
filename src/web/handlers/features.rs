use crate::models::{CreateFeature, Feature, FeatureWithCount, UpdateFeature};
use crate::services::features;
use crate::web::error::ApiResult;
use crate::web::extractors::CurrentUser;
use crate::web::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use std::sync::Arc;

/// POST /p/:projectSlug/f
pub async fn create(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(project_slug): Path<String>,
    Json(input): Json<CreateFeature>,
) -> ApiResult<(StatusCode, Json<Feature>)> {
    let feature = features::create_feature(&state.db, user.id, &project_slug, &input)?;
    Ok((StatusCode::CREATED, Json(feature)))
}

/// GET /p/:projectSlug/f
pub async fn list(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(project_slug): Path<String>,
) -> ApiResult<Json<Vec<FeatureWithCount>>> {
    let features = features::list_features(&state.db, user.id, &project_slug)?;
    Ok(Json(features))
}

/// GET /p/:projectSlug/f/:featureSlug
pub async fn get(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((project_slug, feature_slug)): Path<(String, String)>,
) -> ApiResult<Json<Feature>> {
    let feature = features::get_feature(&state.db, user.id, &project_slug, &feature_slug)?;
    Ok(Json(feature))
}

/// PATCH /p/:projectSlug/f/:featureSlug
pub async fn update(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((project_slug, feature_slug)): Path<(String, String)>,
    Json(input): Json<UpdateFeature>,
) -> ApiResult<Json<Feature>> {
    let feature =
        features::update_feature(&state.db, user.id, &project_slug, &feature_slug, &input)?;
    Ok(Json(feature))
}

/// DELETE /p/:projectSlug/f/:featureSlug
pub async fn remove(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((project_slug, feature_slug)): Path<(String, String)>,
) -> ApiResult<Json<Feature>> {
    let feature = features::delete_feature(&state.db, user.id, &project_slug, &feature_slug)?;
    Ok(Json(feature))
}
