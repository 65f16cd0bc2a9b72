use crate::error::Error;
use crate::models::UserProfile;
use crate::services::users;
use crate::web::error::ApiResult;
use crate::web::state::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use std::sync::Arc;

/// GET /users/:slug, public profile. No authentication required.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<UserProfile>> {
    let user = users::find_by_slug(&state.db, &slug)?
        .ok_or_else(|| Error::not_found("user", slug))?;
    Ok(Json(UserProfile::from(&user)))
}
