use super::handlers;
use super::state::AppState;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use std::sync::Arc;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/users/:slug", get(handlers::users::profile))
}

// The first segment under /p is an id on project detail routes and a slug on
// the nested ones; the router needs a single parameter name for both, so it
// is ":projectRef" throughout and each handler binds the shape it expects.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route("/p", post(handlers::projects::create))
        .route("/p", get(handlers::projects::list))
        .route("/p/slug/:slug", get(handlers::projects::get_by_slug))
        .route("/p/:projectRef", get(handlers::projects::get))
        .route("/p/:projectRef", patch(handlers::projects::update))
        .route("/p/:projectRef", delete(handlers::projects::remove))
        .route("/p/:projectRef/f", post(handlers::features::create))
        .route("/p/:projectRef/f", get(handlers::features::list))
        .route(
            "/p/:projectRef/f/:featureSlug",
            get(handlers::features::get),
        )
        .route(
            "/p/:projectRef/f/:featureSlug",
            patch(handlers::features::update),
        )
        .route(
            "/p/:projectRef/f/:featureSlug",
            delete(handlers::features::remove),
        )
        .route(
            "/p/:projectRef/f/:featureSlug/t",
            post(handlers::tasks::create),
        )
        .route(
            "/p/:projectRef/f/:featureSlug/t",
            get(handlers::tasks::list),
        )
        .route(
            "/p/:projectRef/f/:featureSlug/t/:taskSlug",
            get(handlers::tasks::get),
        )
        .route(
            "/p/:projectRef/f/:featureSlug/t/:taskSlug",
            patch(handlers::tasks::update),
        )
        .route(
            "/p/:projectRef/f/:featureSlug/t/:taskSlug",
            delete(handlers::tasks::remove),
        )
}
