//! Portfolio Web Server
//!
//! Axum-based REST API over the project portfolio.

pub mod error;
pub mod routes;
pub mod state;

use axum::{
    routing::{get, patch, post},
    Router,
};
use portfolio_db::DbPool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Members
        .route(
            "/members",
            get(routes::members::list_members).post(routes::members::create_member),
        )
        .route("/members/{id}", get(routes::members::get_member))
        .route("/members/role/{role}", get(routes::members::list_members_by_role))
        // Projects
        .route(
            "/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route("/projects/report", get(routes::projects::get_report))
        .route(
            "/projects/{id}",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route("/projects/{id}/status", patch(routes::projects::change_status))
        .route(
            "/projects/{id}/members/{member_id}",
            post(routes::projects::add_member).delete(routes::projects::remove_member),
        )
        .with_state(state.clone());

    Router::new()
        .route("/health", get(routes::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(db: DbPool, host: &str, port: u16, page_size: u32) -> anyhow::Result<()> {
    let state = AppState::new(db).with_page_size(page_size);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
