// File: crates/services/pawbook_backend/src/main.rs
mod app_state;
mod service_factory;

use app_state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Router};
use pawbook_config::load_config;
use pawbook_slots::routes as slots_routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

#[axum::debug_handler]
async fn health_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.db.is_healthy().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[tokio::main]
async fn main() {
    pawbook_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));
    let state = Arc::new(
        AppState::new(config.clone())
            .await
            .expect("Failed to initialize application state"),
    );

    let core_router = Router::new()
        .route("/", get(|| async { "Welcome to the Pawbook API!" }))
        .route("/healthz", get(health_handler))
        .with_state(state.clone());

    let slots_router = slots_routes(state.slots_state());

    #[allow(unused_mut)] // mutable only when features add routes below
    let mut app = Router::new().nest("/api", core_router.merge(slots_router));

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use pawbook_slots::doc::SlotsApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Pawbook API",
                version = "0.1.0",
                description = "Dog-walk slot booking API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(SlotsApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    // Serve the built frontend in dev mode
    if cfg!(debug_assertions) {
        info!("Running in development mode, serving static files from ./dist");
        app = app.fallback_service(ServeDir::new("dist"));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
