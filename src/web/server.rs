use axum::{
    extract::{rejection::PathRejection, Path, Request, State},
    http::{header, HeaderValue},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::flights as flight_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::frontend::{self, FAVICON, INDEX_ROUTES, STATIC_PREFIXES};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("port {port} is already in use")]
    PortInUse { port: u16 },
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct AppState {
    /// Static root holding the entry document and asset trees.
    pub root: Arc<PathBuf>,
}

impl AppState {
    pub fn new(root: PathBuf) -> Self {
        AppState {
            root: Arc::new(root),
        }
    }
}

/// Builds the route table. Axum matches exact paths before wildcards, and
/// anything unclaimed lands on the entry document fallback.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/api/get-all-flight-timestamps",
            get(flight_handlers::get_all_flight_timestamps),
        )
        .route("/api/get-flight-data", get(flight_handlers::get_flight_data))
        .layer(middleware::map_response(allow_any_origin))
        .layer(cors);

    let mut app = Router::new().merge(api);

    // Client-side routes
    for route in INDEX_ROUTES {
        app = app.route(route, get(frontend::serve_index));
    }

    // Static files
    for prefix in STATIC_PREFIXES {
        app = app.route(
            &format!("/{}/{{*path}}", prefix),
            get(
                move |State(state): State<AppState>,
                      tail: Result<Path<String>, PathRejection>,
                      request: Request| {
                    frontend::serve_prefixed(state, prefix, tail, request)
                },
            ),
        );
    }
    app = app.route(
        &format!("/{}", FAVICON),
        get(|State(state): State<AppState>, request: Request| {
            frontend::serve_asset(state, FAVICON.to_string(), request)
        }),
    );

    app
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(frontend::spa_fallback)
        // Middleware
        .layer(middleware::from_fn(access_log))
        .with_state(state)
}

pub async fn bind_listener(host: &str, port: u16) -> Result<TcpListener, ServerError> {
    let addr = format!("{}:{}", host, port);
    TcpListener::bind(&addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            ServerError::PortInUse { port }
        } else {
            ServerError::Bind { addr, source: e }
        }
    })
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let listener = bind_listener(&config.web.host, config.web.port).await?;
    let state = AppState::new(config.frontend.root.clone());

    log_banner(&config);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped by user");
    Ok(())
}

fn log_banner(config: &Config) {
    log::info!("Water rocket launchpad dev server");
    log::info!("Listening on {}", config.bind_addr());
    log::info!("Serving files from: {}", config.frontend.root.display());
    log::info!("Open your browser to: http://localhost:{}", config.web.port);
    log::info!("Routes serving index.html: {}", INDEX_ROUTES.join(", "));
    log::info!(
        "Static file routes: {}",
        STATIC_PREFIXES
            .iter()
            .map(|p| format!("/{}/", p))
            .collect::<Vec<_>>()
            .join(", ")
    );
    log::info!("API endpoints available:");
    log::info!("  - GET /api/get-all-flight-timestamps (dummy data)");
    log::info!("  - GET /api/get-flight-data?timestamp=<timestamp> (dummy data)");
    log::info!("OpenAPI docs: http://localhost:{}/swagger-ui", config.web.port);

    if !config.frontend.root.join(frontend::ENTRY_DOCUMENT).is_file() {
        log::warn!(
            "{} is missing from {}, application routes will answer 404",
            frontend::ENTRY_DOCUMENT,
            config.frontend.root.display()
        );
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} {} ({:.1?})",
        method,
        path,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

async fn allow_any_origin(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}
