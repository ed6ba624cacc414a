use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod auth;
pub mod health;
pub mod operators;
pub mod owners;
pub mod recipes;
pub mod restaurants;
pub mod upload;

/// Build the full application router: public catalog, operator-only routes,
/// image upload and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/detailed", get(health::detailed))
        .route("/health/ready", get(health::ready))
        .route("/health/live", get(health::live));

    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout));

    let catalog = Router::new()
        .route("/restaurants", get(restaurants::list).post(restaurants::create))
        .route("/restaurants/with-owner", post(restaurants::create_with_owner))
        .route("/restaurants/complete", post(restaurants::create_complete))
        .route(
            "/restaurants/:id",
            get(restaurants::get).patch(restaurants::update).delete(restaurants::delete),
        )
        .route(
            "/restaurants/:id/recipes/:recipe_id",
            post(restaurants::add_recipe).delete(restaurants::remove_recipe),
        )
        .route("/owners", get(owners::list).post(owners::create))
        .route(
            "/owners/:id",
            get(owners::get).patch(owners::update).delete(owners::delete),
        )
        .route("/owners/:id/restaurants", get(owners::restaurants))
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/recipes/:id",
            get(recipes::get).patch(recipes::update).delete(recipes::delete),
        )
        .route("/recipes/restaurant/:restaurant_id", get(recipes::by_restaurant))
        .route(
            "/recipes/:id/restaurant/:restaurant_id",
            post(recipes::link_restaurant).delete(recipes::unlink_restaurant),
        );

    // Operator-only routes
    let protected = Router::new()
        .route("/auth/profile", get(auth::profile))
        .route("/operators", get(operators::list).post(operators::create))
        .route(
            "/operators/:id",
            get(operators::get).patch(operators::update).delete(operators::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_operator));

    let body_limit = state
        .uploads
        .as_ref()
        .map_or(upload::FALLBACK_BODY_LIMIT, |u| u.max_bytes() + upload::MULTIPART_OVERHEAD);
    let upload_routes = Router::new()
        .route("/upload/image", post(upload::upload_image))
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .merge(health_routes)
        .merge(auth_routes)
        .merge(catalog)
        .merge(protected)
        .merge(upload_routes)
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
