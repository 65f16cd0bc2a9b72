use crate::models::{AuthResponse, LoginUser, RegisterUser, User};
use crate::services::auth;
use crate::web::error::ApiResult;
use crate::web::extractors::CurrentUser;
use crate::web::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use std::sync::Arc;

fn too_many_attempts() -> Response {
    let body = serde_json::json!({
        "error": "Too Many Requests",
        "message": "Too many failed attempts, try again later",
    });
    (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response()
}

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RegisterUser>,
) -> ApiResult<Response> {
    let user = auth::register(&state.db, &input)?;
    let access_token =
        auth::create_session(&state.db, user.id, state.config.auth.session_lifetime_days)?;

    tracing::info!("registered user '{}'", user.slug);
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse { user, access_token }),
    )
        .into_response())
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(input): Json<LoginUser>,
) -> ApiResult<Response> {
    if !state.rate_limiter.check(&input.email) {
        return Ok(too_many_attempts());
    }

    let user = match auth::authenticate(&state.db, &input.email, &input.password) {
        Ok(user) => user,
        Err(e) => {
            state.rate_limiter.record_attempt(&input.email);
            return Err(e.into());
        }
    };
    state.rate_limiter.clear(&input.email);

    let access_token =
        auth::create_session(&state.db, user.id, state.config.auth.session_lifetime_days)?;
    Ok(Json(AuthResponse { user, access_token }).into_response())
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> ApiResult<StatusCode> {
    auth::delete_session(&state.db, bearer.token())?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}
